use serde::Serialize;
use shutterbox_application::ApplicationError;
use shutterbox_domain::{ImageAsset, ImportReport, Notice, UploadOutcome, UploadSummary};

#[derive(Debug, Serialize)]
struct AssetRow<'a> {
    id: &'a str,
    created_at: String,
    uploaded: bool,
    image_bytes: usize,
    thumbnail_bytes: usize,
    source_uri: Option<&'a str>,
}

impl<'a> From<&'a ImageAsset> for AssetRow<'a> {
    fn from(asset: &'a ImageAsset) -> Self {
        Self {
            id: asset.id.as_str(),
            created_at: asset.created_at.to_rfc3339(),
            uploaded: asset.is_uploaded(),
            image_bytes: asset.image_data.as_ref().map_or(0, Vec::len),
            thumbnail_bytes: asset.thumbnail_data.as_ref().map_or(0, Vec::len),
            source_uri: asset.source_uri.as_deref(),
        }
    }
}

pub fn present_asset_row(asset: &ImageAsset) -> String {
    let row = AssetRow::from(asset);
    format!(
        "{}\t{}\t{}\t{}\t{}",
        row.id,
        if row.uploaded { "uploaded" } else { "pending" },
        row.created_at,
        row.image_bytes,
        row.source_uri.unwrap_or("-")
    )
}

pub fn present_assets_json(assets: &[ImageAsset]) -> Result<String, ApplicationError> {
    let rows: Vec<AssetRow<'_>> = assets.iter().map(AssetRow::from).collect();
    serde_json::to_string_pretty(&rows)
        .map_err(|error| ApplicationError::InvalidInput(error.to_string()))
}

pub fn present_notice(notice: &Notice) -> String {
    format!("[{}] {}", notice.title, notice.message)
}

pub fn present_upload_outcome(asset_id: &str, outcome: &UploadOutcome) -> String {
    match outcome {
        UploadOutcome::Uploaded {
            receipt: Some(receipt),
        } => format!("uploaded {asset_id} ({receipt})"),
        UploadOutcome::Uploaded { receipt: None } => format!("uploaded {asset_id}"),
        UploadOutcome::Failed { reason } => format!("upload of {asset_id} failed: {reason}"),
    }
}

pub fn present_upload_summary(summary: &UploadSummary) -> String {
    format!(
        "upload finished: attempted={}, uploaded={}, failed={}, skipped={}",
        summary.attempted, summary.uploaded, summary.failed, summary.skipped
    )
}

pub fn present_import_report(report: &ImportReport) -> String {
    format!(
        "import finished: scanned={}, supported={}, newly_imported={}",
        report.scanned_files, report.supported_files, report.newly_imported
    )
}
