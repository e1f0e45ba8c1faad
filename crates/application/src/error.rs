use shutterbox_domain::{AssetId, DomainError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upload already in progress for asset {0}")]
    AlreadyInProgress(AssetId),
    #[error("asset {0} is already uploaded")]
    AlreadyUploaded(AssetId),
    #[error("io error: {0}")]
    Io(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApplicationError {
    pub(crate) fn asset_not_found(asset_id: &AssetId) -> Self {
        Self::NotFound(format!("asset not found for id={asset_id}"))
    }
}
