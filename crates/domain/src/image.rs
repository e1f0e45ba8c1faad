use std::fmt::{Display, Formatter};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let parsed = Uuid::parse_str(value.trim())
            .map_err(|_| DomainError::InvalidAssetId(value.to_string()))?;
        Ok(Self(parsed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AssetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    #[default]
    NotUploaded,
    Uploaded,
}

impl UploadStatus {
    pub fn from_flag(is_uploaded: bool) -> Self {
        if is_uploaded {
            Self::Uploaded
        } else {
            Self::NotUploaded
        }
    }

    pub fn is_uploaded(self) -> bool {
        self == Self::Uploaded
    }
}

/// A captured or imported photo as persisted by the asset store.
///
/// Only `upload_status` changes after creation, and only towards `Uploaded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub id: AssetId,
    pub image_data: Option<Vec<u8>>,
    pub thumbnail_data: Option<Vec<u8>>,
    pub source_uri: Option<String>,
    pub created_at: DateTime<Utc>,
    pub upload_status: UploadStatus,
}

impl ImageAsset {
    pub fn is_uploaded(&self) -> bool {
        self.upload_status.is_uploaded()
    }

    /// File name used when the asset leaves the device.
    pub fn file_name(&self) -> String {
        self.source_uri
            .as_deref()
            .and_then(|uri| uri.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}.jpg", self.id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Unsupported,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub scanned_files: usize,
    pub supported_files: usize,
    pub newly_imported: usize,
}

pub fn detect_image_kind(path: &Path) -> ImageKind {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return ImageKind::Unsupported;
    };

    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => ImageKind::Jpeg,
        "png" => ImageKind::Png,
        _ => ImageKind::Unsupported,
    }
}
