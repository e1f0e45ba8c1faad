use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shutterbox_domain::{
    AssetId, ImageAsset, Notice, TransportOutcome, UploadOutcome, UploadState,
};
use tracing::{debug, info, warn};

use crate::{ApplicationError, AssetStore, NoticeSink, Transport};

/// Upload lifecycle of a single asset.
///
/// `start` runs synchronously up to the transport call, so `on_progress(true)`
/// has fired and the in-flight guard is armed before the first suspension. On
/// a delivered upload the persisted flag is written before `on_complete(true)`.
pub struct UploadWorkflow {
    asset_id: AssetId,
    store: Arc<AssetStore>,
    state: Mutex<UploadState>,
}

impl UploadWorkflow {
    pub fn new(asset_id: AssetId, store: Arc<AssetStore>) -> Self {
        Self {
            asset_id,
            store,
            state: Mutex::new(UploadState::Idle),
        }
    }

    pub fn state(&self) -> UploadState {
        *self.lock_state()
    }

    pub async fn start<P, C>(
        &self,
        asset: &ImageAsset,
        transport: &dyn Transport,
        on_progress: P,
        on_complete: C,
    ) -> Result<UploadOutcome, ApplicationError>
    where
        P: Fn(bool) + Send,
        C: FnOnce(bool) + Send,
    {
        if asset.id != self.asset_id {
            return Err(ApplicationError::InvalidInput(format!(
                "workflow for {} cannot upload {}",
                self.asset_id, asset.id
            )));
        }

        let current = self
            .store
            .find(&self.asset_id)?
            .ok_or_else(|| ApplicationError::asset_not_found(&self.asset_id))?;
        if current.is_uploaded() {
            debug!(asset_id = %self.asset_id, "upload skipped, asset already uploaded");
            return Err(ApplicationError::AlreadyUploaded(self.asset_id.clone()));
        }

        self.begin()?;
        on_progress(true);
        debug!(asset_id = %self.asset_id, "upload started");

        match transport.upload(&current).await {
            TransportOutcome::Delivered { receipt } => {
                self.set_state(UploadState::Succeeded);
                on_progress(false);
                if let Err(error) = self.store.mark_uploaded(&self.asset_id) {
                    self.set_state(UploadState::Failed);
                    on_complete(false);
                    warn!(asset_id = %self.asset_id, %error, "delivered upload could not be recorded");
                    return Err(error);
                }
                on_complete(true);
                info!(asset_id = %self.asset_id, "upload succeeded");
                Ok(UploadOutcome::Uploaded { receipt })
            }
            TransportOutcome::Failed { reason } => {
                self.set_state(UploadState::Failed);
                on_progress(false);
                on_complete(false);
                warn!(asset_id = %self.asset_id, %reason, "upload failed");
                Ok(UploadOutcome::Failed { reason })
            }
        }
    }

    fn begin(&self) -> Result<(), ApplicationError> {
        let mut state = self.lock_state();
        match state.begin() {
            Ok(next) => {
                *state = next;
                Ok(())
            }
            Err(_) if *state == UploadState::Succeeded => {
                Err(ApplicationError::AlreadyUploaded(self.asset_id.clone()))
            }
            Err(_) => Err(ApplicationError::AlreadyInProgress(self.asset_id.clone())),
        }
    }

    fn set_state(&self, next: UploadState) {
        *self.lock_state() = next;
    }

    fn lock_state(&self) -> MutexGuard<'_, UploadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Hands out one `UploadWorkflow` per asset id and reports outcomes to the
/// notice sink.
pub struct UploadCoordinator {
    store: Arc<AssetStore>,
    transport: Arc<dyn Transport>,
    notices: Arc<dyn NoticeSink>,
    workflows: Mutex<HashMap<AssetId, Arc<UploadWorkflow>>>,
}

impl UploadCoordinator {
    pub fn new(
        store: Arc<AssetStore>,
        transport: Arc<dyn Transport>,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            store,
            transport,
            notices,
            workflows: Mutex::new(HashMap::new()),
        }
    }

    pub fn workflow(&self, asset_id: &AssetId) -> Arc<UploadWorkflow> {
        let mut workflows = self.lock_workflows();
        Arc::clone(workflows.entry(asset_id.clone()).or_insert_with(|| {
            Arc::new(UploadWorkflow::new(
                asset_id.clone(),
                Arc::clone(&self.store),
            ))
        }))
    }

    pub fn state_of(&self, asset_id: &AssetId) -> UploadState {
        self.lock_workflows()
            .get(asset_id)
            .map(|workflow| workflow.state())
            .unwrap_or_default()
    }

    pub async fn upload<P, C>(
        &self,
        asset_id: &AssetId,
        on_progress: P,
        on_complete: C,
    ) -> Result<UploadOutcome, ApplicationError>
    where
        P: Fn(bool) + Send,
        C: FnOnce(bool) + Send,
    {
        let asset = match self.store.find(asset_id)? {
            Some(asset) => asset,
            None => {
                warn!(%asset_id, "upload requested for missing asset");
                return Err(ApplicationError::asset_not_found(asset_id));
            }
        };

        let workflow = self.workflow(asset_id);
        let result = workflow
            .start(&asset, self.transport.as_ref(), on_progress, on_complete)
            .await;

        match &result {
            Ok(UploadOutcome::Uploaded { .. }) => {
                self.notices.alert(&Notice::UPLOAD_SUCCEEDED);
                self.notices.schedule_notification(&Notice::UPLOAD_COMPLETE);
            }
            Ok(UploadOutcome::Failed { .. }) | Err(ApplicationError::Persistence(_)) => {
                self.notices.alert(&Notice::UPLOAD_FAILED);
            }
            Err(ApplicationError::NotFound(_)) => {
                warn!(%asset_id, "asset vanished during upload");
                self.notices.alert(&Notice::UPLOAD_FAILED);
            }
            Err(_) => {}
        }
        result
    }

    /// Drops every workflow that is not currently in flight.
    pub fn prune_settled(&self) {
        self.lock_workflows()
            .retain(|_, workflow| workflow.state() == UploadState::InProgress);
    }

    fn lock_workflows(&self) -> MutexGuard<'_, HashMap<AssetId, Arc<UploadWorkflow>>> {
        self.workflows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
