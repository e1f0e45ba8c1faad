use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use shutterbox_domain::ThumbnailSpec;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "SHUTTERBOX_CONFIG";
pub const UPLOAD_ENDPOINT_ENV: &str = "SHUTTERBOX_UPLOAD_ENDPOINT";
const DEFAULT_CONFIG_FILE: &str = "shutterbox.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog_path: String,
    pub media_dir: String,
    pub thumbnail: ThumbnailSpec,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Real endpoint. Without one, uploads go through the simulated transport.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    pub simulated_delay_ms: u64,
    pub simulated_success_rate: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: "catalog.sqlite3".to_string(),
            media_dir: "media".to_string(),
            thumbnail: ThumbnailSpec::default(),
            upload: UploadConfig::default(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 30,
            simulated_delay_ms: 2_000,
            simulated_success_rate: 0.5,
        }
    }
}

impl UploadConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}

impl AppConfig {
    /// `$SHUTTERBOX_CONFIG`, else `./shutterbox.toml` when present, else
    /// defaults. `$SHUTTERBOX_UPLOAD_ENDPOINT` wins over the file.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.override_endpoint(std::env::var(UPLOAD_ENDPOINT_ENV).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn override_endpoint(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|value| !value.trim().is_empty()) {
            self.upload.endpoint = Some(endpoint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_uses_local_catalog_and_simulated_uploads() {
        let config = AppConfig::default();
        assert_eq!(config.catalog_path, "catalog.sqlite3");
        assert_eq!(config.media_dir, "media");
        assert_eq!(config.thumbnail, ThumbnailSpec::default());
        assert_eq!(config.upload.endpoint, None);
        assert_eq!(config.upload.simulated_delay(), Duration::from_secs(2));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("shutterbox.toml");
        std::fs::write(
            &path,
            "media_dir = \"/var/photos\"\n\n[thumbnail]\nmax_width = 160\n\n[upload]\nendpoint = \"https://example.com/api/upload\"\n",
        )
        .expect("write");

        let config = AppConfig::from_file(&path).expect("load");
        assert_eq!(config.catalog_path, "catalog.sqlite3");
        assert_eq!(config.media_dir, "/var/photos");
        assert_eq!(config.thumbnail.max_width, 160);
        assert_eq!(config.thumbnail.max_height, 100);
        assert_eq!(
            config.upload.endpoint.as_deref(),
            Some("https://example.com/api/upload")
        );
        assert_eq!(config.upload.timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "catalog_path = [").expect("write");
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            AppConfig::from_file(&dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn blank_endpoint_override_is_ignored() {
        let mut config = AppConfig::default();
        config.override_endpoint(Some("  ".to_string()));
        assert_eq!(config.upload.endpoint, None);
        config.override_endpoint(Some("http://localhost:8080/upload".to_string()));
        assert_eq!(
            config.upload.endpoint.as_deref(),
            Some("http://localhost:8080/upload")
        );
    }
}
