use thiserror::Error;

use crate::UploadState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("asset id must be a UUID, got {0:?}")]
    InvalidAssetId(String),
    #[error("thumbnail size must be non-zero, got {width}x{height}")]
    InvalidThumbnailSize { width: u32, height: u32 },
    #[error("cannot start an upload while it is {0:?}")]
    UploadNotStartable(UploadState),
}
