use crate::DomainError;

/// Transient, per-asset upload lifecycle. Never persisted; the durable fact is
/// the asset's `UploadStatus`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    InProgress,
    Succeeded,
    Failed,
}

impl UploadState {
    pub fn can_start(self) -> bool {
        matches!(self, Self::Idle | Self::Failed)
    }

    pub fn begin(self) -> Result<Self, DomainError> {
        if !self.can_start() {
            return Err(DomainError::UploadNotStartable(self));
        }
        Ok(Self::InProgress)
    }
}

/// What a transport reports for a single upload call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOutcome {
    Delivered { receipt: Option<String> },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded { receipt: Option<String> },
    Failed { reason: String },
}

impl UploadOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub attempted: usize,
    pub uploaded: usize,
    pub failed: usize,
    pub skipped: usize,
}
