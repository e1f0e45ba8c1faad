use std::sync::{Mutex, MutexGuard, PoisonError};

use shutterbox_domain::{AssetId, ImageAsset, UploadStatus};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{ApplicationError, AssetRepository, Clock};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Changed,
}

/// Owner of every `ImageAsset` record.
///
/// Writes go through one store-wide lock; reads go straight to the repository
/// and return snapshots. Each successful write broadcasts `StoreEvent::Changed`.
pub struct AssetStore {
    repository: Box<dyn AssetRepository>,
    clock: Box<dyn Clock>,
    write_lock: Mutex<()>,
    changes: broadcast::Sender<StoreEvent>,
}

impl AssetStore {
    pub fn new(repository: Box<dyn AssetRepository>, clock: Box<dyn Clock>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            repository,
            clock,
            write_lock: Mutex::new(()),
            changes,
        }
    }

    pub fn initialize(&self) -> Result<(), ApplicationError> {
        let _guard = self.lock_writes();
        self.repository.initialize()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.changes.subscribe()
    }

    pub fn create(
        &self,
        image_data: Option<Vec<u8>>,
        thumbnail_data: Option<Vec<u8>>,
        source_uri: Option<String>,
    ) -> Result<ImageAsset, ApplicationError> {
        if thumbnail_data.is_some() && image_data.is_none() {
            return Err(ApplicationError::InvalidInput(
                "thumbnail requires the image it was derived from".to_string(),
            ));
        }

        let asset = ImageAsset {
            id: AssetId::generate(),
            image_data,
            thumbnail_data,
            source_uri,
            created_at: self.clock.now(),
            upload_status: UploadStatus::NotUploaded,
        };

        {
            let _guard = self.lock_writes();
            self.repository.insert_asset(&asset)?;
        }
        self.notify();

        info!(asset_id = %asset.id, "asset created");
        Ok(asset)
    }

    pub fn list(&self) -> Result<Vec<ImageAsset>, ApplicationError> {
        self.repository.list_assets()
    }

    pub fn find(&self, asset_id: &AssetId) -> Result<Option<ImageAsset>, ApplicationError> {
        self.repository.find_asset(asset_id)
    }

    pub fn mark_uploaded(&self, asset_id: &AssetId) -> Result<(), ApplicationError> {
        let found = {
            let _guard = self.lock_writes();
            self.repository.mark_uploaded(asset_id)?
        };
        if !found {
            warn!(%asset_id, "mark_uploaded on missing asset");
            return Err(ApplicationError::asset_not_found(asset_id));
        }
        self.notify();

        debug!(%asset_id, "asset marked uploaded");
        Ok(())
    }

    pub fn delete(&self, asset_id: &AssetId) -> Result<(), ApplicationError> {
        let found = {
            let _guard = self.lock_writes();
            self.repository.delete_asset(asset_id)?
        };
        if !found {
            warn!(%asset_id, "delete on missing asset");
            return Err(ApplicationError::asset_not_found(asset_id));
        }
        self.notify();

        info!(%asset_id, "asset deleted");
        Ok(())
    }

    pub fn delete_all(&self) -> Result<usize, ApplicationError> {
        let removed = {
            let _guard = self.lock_writes();
            self.repository.delete_all()?
        };
        self.notify();

        info!(removed, "all assets deleted");
        Ok(removed)
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self) {
        // No subscribers is fine.
        let _ = self.changes.send(StoreEvent::Changed);
    }
}
