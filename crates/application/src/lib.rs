mod error;
mod gallery;
mod ports;
mod service;
mod store;
mod upload;
mod use_cases;

#[cfg(test)]
mod test_support;

pub use error::ApplicationError;
pub use gallery::Gallery;
pub use ports::{
    AssetRepository, Clock, FileScanSummary, FileScanner, MediaStore, NoticeSink, ScannedFile,
    ThumbnailArtifact, ThumbnailGenerator, Transport,
};
pub use service::ApplicationService;
pub use store::{AssetStore, StoreEvent};
pub use upload::{UploadCoordinator, UploadWorkflow};
pub use use_cases::{
    BootstrapStoreCommand, CaptureImageCommand, DeleteAllCommand, DeleteAssetCommand,
    ImportFolderCommand, ListAssetsCommand, OpenGalleryCommand, UploadAssetCommand,
    UploadPendingCommand,
};
