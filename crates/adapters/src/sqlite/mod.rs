mod queries;

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rusqlite::Connection;
use shutterbox_application::{ApplicationError, AssetRepository};
use shutterbox_domain::{AssetId, ImageAsset};

use crate::migrations::MIGRATIONS;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Asset catalog in a single SQLite file.
///
/// Opened once per process. Writes use one connection and reads another, so
/// with WAL a listing never waits on a write and never sees half of one.
#[derive(Debug)]
pub struct SqliteAssetRepository {
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
}

impl SqliteAssetRepository {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ApplicationError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "catalog path must not be empty".to_string(),
            ));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|error| ApplicationError::Io(error.to_string()))?;
            }
        }

        let writer = open_connection(path)?;
        writer
            .execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(persistence)?;
        let reader = open_connection(path)?;

        Ok(Self {
            writer: Mutex::new(writer),
            reader: Mutex::new(reader),
        })
    }

    fn writer(&self) -> MutexGuard<'_, Connection> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reader(&self) -> MutexGuard<'_, Connection> {
        self.reader.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn open_connection(path: &Path) -> Result<Connection, ApplicationError> {
    let conn = Connection::open(path).map_err(persistence)?;
    conn.busy_timeout(BUSY_TIMEOUT).map_err(persistence)?;
    Ok(conn)
}

fn persistence(error: rusqlite::Error) -> ApplicationError {
    ApplicationError::Persistence(error.to_string())
}

impl AssetRepository for SqliteAssetRepository {
    fn initialize(&self) -> Result<(), ApplicationError> {
        let conn = self.writer();
        for migration in MIGRATIONS {
            conn.execute_batch(migration).map_err(persistence)?;
        }
        Ok(())
    }

    fn insert_asset(&self, asset: &ImageAsset) -> Result<(), ApplicationError> {
        queries::insert_asset(&self.writer(), asset).map_err(persistence)
    }

    fn list_assets(&self) -> Result<Vec<ImageAsset>, ApplicationError> {
        queries::list_assets(&self.reader()).map_err(persistence)
    }

    fn find_asset(&self, asset_id: &AssetId) -> Result<Option<ImageAsset>, ApplicationError> {
        queries::find_asset(&self.reader(), asset_id.as_str()).map_err(persistence)
    }

    fn mark_uploaded(&self, asset_id: &AssetId) -> Result<bool, ApplicationError> {
        let changed =
            queries::mark_uploaded(&self.writer(), asset_id.as_str()).map_err(persistence)?;
        Ok(changed > 0)
    }

    fn delete_asset(&self, asset_id: &AssetId) -> Result<bool, ApplicationError> {
        let removed =
            queries::delete_asset(&self.writer(), asset_id.as_str()).map_err(persistence)?;
        Ok(removed > 0)
    }

    fn delete_all(&self) -> Result<usize, ApplicationError> {
        queries::delete_all(&mut self.writer()).map_err(persistence)
    }
}
