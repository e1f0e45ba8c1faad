mod error;
mod image;
mod notice;
mod thumbnail;
mod upload;

pub use error::DomainError;
pub use image::{detect_image_kind, AssetId, ImageAsset, ImageKind, ImportReport, UploadStatus};
pub use notice::Notice;
pub use thumbnail::ThumbnailSpec;
pub use upload::{TransportOutcome, UploadOutcome, UploadState, UploadSummary};
