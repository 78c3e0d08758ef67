//! Upload item state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FileMeta;

/// Lifecycle of one file within a batch.
///
/// Transitions run strictly forward. `Failed` is reachable from `Reading`
/// and `Uploading`, and only leaves through an explicit host-driven retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    /// Created, nothing read yet.
    Pending,
    /// Bytes are being read for preview generation.
    Reading,
    /// Preview built, waiting for the transfer to start.
    ReadyToUpload,
    /// Transfer in flight.
    Uploading,
    /// Endpoint acknowledged the transfer.
    Succeeded,
    /// Read or transfer failed; terminal except for retry.
    Failed,
}

impl UploadStatus {
    /// Whether `from -> to` is a legal lifecycle step.
    pub fn can_transition(from: Self, to: Self) -> bool {
        use UploadStatus::*;
        matches!(
            (from, to),
            (Pending, Reading)
                | (Reading, ReadyToUpload)
                | (Reading, Failed)
                | (ReadyToUpload, Uploading)
                | (Uploading, Succeeded)
                | (Uploading, Failed)
                // Manual retry re-enters the queue.
                | (Failed, ReadyToUpload)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Identifier for one upload item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-side visual stand-in for a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preview {
    /// Inline data URL, used for image types.
    DataUrl(String),
    /// Generic icon placeholder for non-previewable types.
    Placeholder,
}

/// Observable state of one file's upload lifecycle.
///
/// Snapshots of this are what render hooks and [`super::UploadController::snapshot`]
/// hand to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadItem {
    pub id: ItemId,
    pub meta: FileMeta,
    pub status: UploadStatus,
    pub preview: Option<Preview>,
    /// Monotonic transfer progress, 0..=100.
    pub progress_percent: u8,
    /// Failure description; always non-empty when `status` is `Failed`.
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UploadItem {
    pub(crate) fn new(meta: FileMeta) -> Self {
        Self {
            id: ItemId::new(),
            meta,
            status: UploadStatus::Pending,
            preview: None,
            progress_percent: 0,
            error: None,
            created_at: Utc::now(),
        }
    }

    /// Advances the lifecycle. Illegal steps are logged and ignored.
    pub(crate) fn transition(&mut self, to: UploadStatus) -> bool {
        if !UploadStatus::can_transition(self.status, to) {
            log::warn!(
                "[upload] ignoring illegal transition {:?} -> {to:?} for {}",
                self.status,
                self.meta.name
            );
            return false;
        }
        log::debug!("[upload] {} {:?} -> {to:?}", self.meta.name, self.status);
        self.status = to;
        true
    }

    /// Raises the progress percentage; decreases are ignored so observers
    /// always see a monotonic 0 -> 100.
    pub(crate) fn set_progress(&mut self, percent: u8) {
        let clamped = percent.min(100);
        if clamped > self.progress_percent {
            self.progress_percent = clamped;
        }
    }

    /// Marks the item failed with a guaranteed non-empty message.
    pub(crate) fn fail(&mut self, message: impl Into<String>) -> bool {
        if !self.transition(UploadStatus::Failed) {
            return false;
        }
        let message = message.into();
        self.error = Some(if message.is_empty() {
            "unknown error".to_string()
        } else {
            message
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> UploadItem {
        UploadItem::new(FileMeta::new("a.png", 10, "image/png"))
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut item = item();
        assert!(item.transition(UploadStatus::Reading));
        assert!(item.transition(UploadStatus::ReadyToUpload));
        assert!(item.transition(UploadStatus::Uploading));
        assert!(item.transition(UploadStatus::Succeeded));
        assert!(item.status.is_terminal());
    }

    #[test]
    fn test_backward_transitions_rejected() {
        let mut item = item();
        item.transition(UploadStatus::Reading);
        item.transition(UploadStatus::ReadyToUpload);

        assert!(!item.transition(UploadStatus::Pending));
        assert!(!item.transition(UploadStatus::Reading));
        assert_eq!(item.status, UploadStatus::ReadyToUpload);
    }

    #[test]
    fn test_failed_is_terminal_except_retry() {
        let mut item = item();
        item.transition(UploadStatus::Reading);
        assert!(item.fail("boom"));

        assert!(!item.transition(UploadStatus::Uploading));
        assert!(!item.transition(UploadStatus::Succeeded));
        // The one legal way out
        assert!(item.transition(UploadStatus::ReadyToUpload));
    }

    #[test]
    fn test_pending_cannot_fail_directly() {
        assert!(!UploadStatus::can_transition(
            UploadStatus::Pending,
            UploadStatus::Failed
        ));
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut item = item();
        item.set_progress(40);
        item.set_progress(20);
        assert_eq!(item.progress_percent, 40);

        item.set_progress(150);
        assert_eq!(item.progress_percent, 100);
    }

    #[test]
    fn test_fail_message_never_empty() {
        let mut item = item();
        item.transition(UploadStatus::Reading);
        item.fail("");
        assert_eq!(item.error.as_deref(), Some("unknown error"));
    }

    #[test]
    fn test_snapshot_serializes_for_the_host() {
        let mut item = item();
        item.transition(UploadStatus::Reading);
        item.fail("boom");

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"status\":\"Failed\""));
        assert!(json.contains("\"error\":\"boom\""));
        assert!(json.contains("\"name\":\"a.png\""));
    }
}
