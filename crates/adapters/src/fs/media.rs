use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use shutterbox_application::{ApplicationError, MediaStore};
use tracing::debug;
use uuid::Uuid;

const FILE_SCHEME: &str = "file://";

/// Keeps originals as `<media_dir>/<uuid>.<ext>` and hands back `file://` URIs.
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MediaStore for FsMediaStore {
    fn persist_original(&self, image_data: &[u8]) -> Result<String, ApplicationError> {
        fs::create_dir_all(&self.root).map_err(|error| ApplicationError::Io(error.to_string()))?;

        let extension = match image::guess_format(image_data) {
            Ok(ImageFormat::Png) => "png",
            _ => "jpg",
        };
        let path = self.root.join(format!("{}.{extension}", Uuid::new_v4()));
        fs::write(&path, image_data).map_err(|error| ApplicationError::Io(error.to_string()))?;

        let absolute = path
            .canonicalize()
            .map_err(|error| ApplicationError::Io(error.to_string()))?;
        Ok(format!("{FILE_SCHEME}{}", absolute.display()))
    }

    fn discard(&self, uri: &str) -> Result<(), ApplicationError> {
        let Some(path) = uri.strip_prefix(FILE_SCHEME) else {
            return Err(ApplicationError::InvalidInput(format!(
                "not a file uri: {uri}"
            )));
        };
        let root = match self.root.canonicalize() {
            Ok(root) => root,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(()),
            Err(error) => return Err(ApplicationError::Io(error.to_string())),
        };
        let path = Path::new(path);
        if !path.starts_with(&root) {
            return Err(ApplicationError::InvalidInput(format!(
                "{uri} is outside the media directory"
            )));
        }

        match fs::remove_file(path) {
            Ok(()) => {
                debug!(%uri, "original discarded");
                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ApplicationError::Io(error.to_string())),
        }
    }
}
