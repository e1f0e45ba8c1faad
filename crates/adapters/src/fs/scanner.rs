use std::fs;
use std::path::Path;

use shutterbox_application::{ApplicationError, FileScanSummary, FileScanner, ScannedFile};
use shutterbox_domain::{detect_image_kind, ImageKind};
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct WalkdirFileScanner;

impl FileScanner for WalkdirFileScanner {
    fn scan_supported(&self, folder: &str) -> Result<FileScanSummary, ApplicationError> {
        let folder_path = Path::new(folder);
        if !folder_path.is_dir() {
            return Err(ApplicationError::InvalidInput(format!(
                "folder does not exist or is not a directory: {folder}"
            )));
        }

        let mut summary = FileScanSummary::default();

        for entry in WalkDir::new(folder_path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }

            summary.scanned_files += 1;
            let file_path = entry.path();
            if detect_image_kind(file_path) == ImageKind::Unsupported {
                continue;
            }

            let canonical = file_path
                .canonicalize()
                .map_err(|error| ApplicationError::Io(error.to_string()))?;

            summary.supported_files += 1;
            summary.files.push(ScannedFile {
                canonical_path: canonical,
            });
        }

        Ok(summary)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ApplicationError> {
        fs::read(path).map_err(|error| {
            ApplicationError::Io(format!("failed to read {}: {error}", path.display()))
        })
    }
}
