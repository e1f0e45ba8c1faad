use std::future::Future;
use std::sync::Arc;

use shutterbox_domain::ImageAsset;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use crate::{ApplicationError, AssetStore, StoreEvent};

/// Read-only snapshot of the store for display, re-listed in full on every
/// change event.
pub struct Gallery {
    store: Arc<AssetStore>,
    changes: broadcast::Receiver<StoreEvent>,
    assets: Vec<ImageAsset>,
}

impl Gallery {
    pub fn open(store: Arc<AssetStore>) -> Result<Self, ApplicationError> {
        // Subscribe before the first listing so no write can slip in between.
        let changes = store.subscribe();
        let assets = store.list()?;
        Ok(Self {
            store,
            changes,
            assets,
        })
    }

    pub fn assets(&self) -> &[ImageAsset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn refresh(&mut self) -> Result<(), ApplicationError> {
        self.assets = self.store.list()?;
        Ok(())
    }

    /// Waits for the next change and re-lists. Returns `false` once the store
    /// is gone and no further changes can arrive.
    pub async fn next_change(&mut self) -> Result<bool, ApplicationError> {
        match self.changes.recv().await {
            Ok(StoreEvent::Changed) => {}
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "gallery lagged behind store changes");
            }
            Err(RecvError::Closed) => return Ok(false),
        }
        self.refresh()?;
        Ok(true)
    }

    /// Runs `work` to completion, calling `on_change` after every successful
    /// re-list in the meantime. A failed refresh keeps the previous snapshot
    /// and never interrupts `work`.
    pub async fn follow<F, R>(&mut self, work: F, mut on_change: R) -> F::Output
    where
        F: Future,
        R: FnMut(&Gallery),
    {
        tokio::pin!(work);
        let mut watching = true;
        loop {
            tokio::select! {
                output = &mut work => return output,
                changed = self.next_change(), if watching => match changed {
                    Ok(true) => on_change(&*self),
                    Ok(false) => watching = false,
                    Err(error) => warn!(%error, "gallery refresh failed"),
                },
            }
        }
    }
}
