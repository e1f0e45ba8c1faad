use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shutterbox_domain::{AssetId, ImageAsset, Notice, ThumbnailSpec, TransportOutcome};

use crate::ApplicationError;

/// Durable collection of image assets.
///
/// Implementations must make every write atomic: a failed call leaves the
/// collection exactly as it was.
pub trait AssetRepository: Send + Sync {
    fn initialize(&self) -> Result<(), ApplicationError>;

    fn insert_asset(&self, asset: &ImageAsset) -> Result<(), ApplicationError>;

    /// Newest first by `created_at`, ties broken by insertion order.
    fn list_assets(&self) -> Result<Vec<ImageAsset>, ApplicationError>;

    fn find_asset(&self, asset_id: &AssetId) -> Result<Option<ImageAsset>, ApplicationError>;

    /// Returns `false` when no record matches.
    fn mark_uploaded(&self, asset_id: &AssetId) -> Result<bool, ApplicationError>;

    /// Returns `false` when no record matches.
    fn delete_asset(&self, asset_id: &AssetId) -> Result<bool, ApplicationError>;

    fn delete_all(&self) -> Result<usize, ApplicationError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Moves an asset's bytes to the remote destination.
///
/// Each call resolves exactly once. Retrying is the caller's decision.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn upload(&self, asset: &ImageAsset) -> TransportOutcome;
}

#[derive(Debug, Clone)]
pub struct ThumbnailArtifact {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub trait ThumbnailGenerator: Send + Sync {
    fn generate(
        &self,
        image_data: &[u8],
        spec: ThumbnailSpec,
    ) -> Result<ThumbnailArtifact, ApplicationError>;
}

pub trait MediaStore: Send + Sync {
    /// Writes the original bytes to durable storage and returns their URI.
    fn persist_original(&self, image_data: &[u8]) -> Result<String, ApplicationError>;

    /// Removes an original written by `persist_original`. Already gone is fine.
    fn discard(&self, uri: &str) -> Result<(), ApplicationError>;
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub canonical_path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct FileScanSummary {
    pub scanned_files: usize,
    pub supported_files: usize,
    pub files: Vec<ScannedFile>,
}

pub trait FileScanner: Send + Sync {
    fn scan_supported(&self, folder: &str) -> Result<FileScanSummary, ApplicationError>;

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ApplicationError>;
}

/// One-way user-facing messages. Nothing is acknowledged.
pub trait NoticeSink: Send + Sync {
    fn alert(&self, notice: &Notice);

    fn schedule_notification(&self, notice: &Notice);
}
