pub mod fs;
pub mod migrations;
pub mod presenters;
pub mod sqlite;
pub mod thumbs;
pub mod transport;

pub use fs::{FsMediaStore, SystemClock, WalkdirFileScanner};
pub use presenters::{
    present_asset_row, present_assets_json, present_import_report, present_notice,
    present_upload_outcome, present_upload_summary,
};
pub use sqlite::SqliteAssetRepository;
pub use thumbs::ImageThumbnailGenerator;
pub use transport::{HttpTransport, SimulatedTransport};
