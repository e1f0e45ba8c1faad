use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use shutterbox_domain::{
    AssetId, ImageAsset, Notice, ThumbnailSpec, TransportOutcome, UploadStatus,
};
use tokio::sync::Notify;

use crate::{
    ApplicationError, AssetRepository, AssetStore, Clock, MediaStore, NoticeSink,
    ThumbnailArtifact, ThumbnailGenerator, Transport,
};

/// Shared, ordered log of side effects used to assert sequencing.
pub(crate) type Journal = Arc<Mutex<Vec<String>>>;

pub(crate) fn record(journal: &Journal, entry: impl Into<String>) {
    journal.lock().expect("journal").push(entry.into());
}

pub(crate) fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().expect("journal").clone()
}

pub(crate) fn store_with(repository: InMemoryRepository) -> AssetStore {
    AssetStore::new(Box::new(repository), Box::new(StepClock::ascending()))
}

#[derive(Default)]
pub(crate) struct InMemoryRepository {
    assets: Mutex<Vec<ImageAsset>>,
    fail_writes: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
    journal: Option<Journal>,
}

impl InMemoryRepository {
    pub(crate) fn with_journal(journal: Journal) -> Self {
        Self {
            journal: Some(journal),
            ..Self::default()
        }
    }

    pub(crate) fn failure_switch(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.fail_writes)
    }

    pub(crate) fn read_failure_switch(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.fail_reads)
    }

    fn check_readable(&self) -> Result<(), ApplicationError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ApplicationError::Persistence("database is locked".to_string()));
        }
        Ok(())
    }

    fn check_writable(&self) -> Result<(), ApplicationError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ApplicationError::Persistence("disk full".to_string()));
        }
        Ok(())
    }
}

impl AssetRepository for InMemoryRepository {
    fn initialize(&self) -> Result<(), ApplicationError> {
        Ok(())
    }

    fn insert_asset(&self, asset: &ImageAsset) -> Result<(), ApplicationError> {
        self.check_writable()?;
        self.assets.lock().expect("assets").push(asset.clone());
        Ok(())
    }

    fn list_assets(&self) -> Result<Vec<ImageAsset>, ApplicationError> {
        self.check_readable()?;
        let assets = self.assets.lock().expect("assets");
        let mut listed: Vec<(usize, ImageAsset)> = assets.iter().cloned().enumerate().collect();
        listed.sort_by(|(left_seq, left), (right_seq, right)| {
            right
                .created_at
                .cmp(&left.created_at)
                .then(right_seq.cmp(left_seq))
        });
        Ok(listed.into_iter().map(|(_, asset)| asset).collect())
    }

    fn find_asset(&self, asset_id: &AssetId) -> Result<Option<ImageAsset>, ApplicationError> {
        self.check_readable()?;
        let assets = self.assets.lock().expect("assets");
        Ok(assets.iter().find(|asset| &asset.id == asset_id).cloned())
    }

    fn mark_uploaded(&self, asset_id: &AssetId) -> Result<bool, ApplicationError> {
        self.check_writable()?;
        let mut assets = self.assets.lock().expect("assets");
        let Some(asset) = assets.iter_mut().find(|asset| &asset.id == asset_id) else {
            return Ok(false);
        };
        asset.upload_status = UploadStatus::Uploaded;
        if let Some(journal) = &self.journal {
            record(journal, "mark_uploaded");
        }
        Ok(true)
    }

    fn delete_asset(&self, asset_id: &AssetId) -> Result<bool, ApplicationError> {
        self.check_writable()?;
        let mut assets = self.assets.lock().expect("assets");
        let before = assets.len();
        assets.retain(|asset| &asset.id != asset_id);
        Ok(assets.len() != before)
    }

    fn delete_all(&self) -> Result<usize, ApplicationError> {
        self.check_writable()?;
        let mut assets = self.assets.lock().expect("assets");
        let removed = assets.len();
        assets.clear();
        Ok(removed)
    }
}

/// Hands out one-second steps from a fixed origin.
pub(crate) struct StepClock {
    ticks: AtomicUsize,
    direction: i64,
}

impl StepClock {
    pub(crate) fn ascending() -> Self {
        Self {
            ticks: AtomicUsize::new(0),
            direction: 1,
        }
    }

    pub(crate) fn descending() -> Self {
        Self {
            ticks: AtomicUsize::new(0),
            direction: -1,
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst) as i64;
        let origin = Utc
            .with_ymd_and_hms(2024, 11, 10, 12, 0, 0)
            .single()
            .expect("valid origin");
        origin + Duration::seconds(tick * self.direction)
    }
}

/// Replays queued outcomes. With a gate, every call parks until `release`.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    outcomes: Mutex<VecDeque<TransportOutcome>>,
    calls: AtomicUsize,
    gate: Option<Notify>,
    journal: Option<Journal>,
}

impl ScriptedTransport {
    pub(crate) fn new(outcomes: Vec<TransportOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            ..Self::default()
        }
    }

    pub(crate) fn gated(outcomes: Vec<TransportOutcome>) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::new(outcomes)
        }
    }

    pub(crate) fn journaled(outcomes: Vec<TransportOutcome>, journal: Journal) -> Self {
        Self {
            journal: Some(journal),
            ..Self::new(outcomes)
        }
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn upload(&self, _asset: &ImageAsset) -> TransportOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(journal) = &self.journal {
            record(journal, "transport");
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcomes
            .lock()
            .expect("outcomes")
            .pop_front()
            .unwrap_or(TransportOutcome::Failed {
                reason: "no scripted outcome".to_string(),
            })
    }
}

pub(crate) fn delivered() -> TransportOutcome {
    TransportOutcome::Delivered {
        receipt: Some("https://cdn.example/img.jpg".to_string()),
    }
}

pub(crate) fn rejected() -> TransportOutcome {
    TransportOutcome::Failed {
        reason: "503 Service Unavailable".to_string(),
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotices {
    pub(crate) alerts: Mutex<Vec<Notice>>,
    pub(crate) notifications: Mutex<Vec<Notice>>,
}

impl NoticeSink for RecordingNotices {
    fn alert(&self, notice: &Notice) {
        self.alerts.lock().expect("alerts").push(*notice);
    }

    fn schedule_notification(&self, notice: &Notice) {
        self.notifications
            .lock()
            .expect("notifications")
            .push(*notice);
    }
}

pub(crate) struct FakeThumbs;

impl ThumbnailGenerator for FakeThumbs {
    fn generate(
        &self,
        image_data: &[u8],
        spec: ThumbnailSpec,
    ) -> Result<ThumbnailArtifact, ApplicationError> {
        if image_data.starts_with(b"garbage") {
            return Err(ApplicationError::Decode("unrecognized image".to_string()));
        }
        Ok(ThumbnailArtifact {
            data: image_data.iter().take(2).copied().collect(),
            width: spec.max_width,
            height: spec.max_height,
        })
    }
}

#[derive(Default)]
pub(crate) struct FakeMedia {
    /// URIs of originals currently on "disk".
    pub(crate) stored: Arc<Mutex<Vec<String>>>,
    pub(crate) fail: bool,
    pub(crate) next: AtomicUsize,
}

impl MediaStore for FakeMedia {
    fn persist_original(&self, _image_data: &[u8]) -> Result<String, ApplicationError> {
        if self.fail {
            return Err(ApplicationError::Io("read-only file system".to_string()));
        }
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        let uri = format!("file:///media/{n}.jpg");
        self.stored.lock().expect("stored").push(uri.clone());
        Ok(uri)
    }

    fn discard(&self, uri: &str) -> Result<(), ApplicationError> {
        self.stored.lock().expect("stored").retain(|kept| kept != uri);
        Ok(())
    }
}
