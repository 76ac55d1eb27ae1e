//! CycleOutcome - tagged result of one full dispatch cycle.

use crate::PublicReference;

/// Result of a capture -> upload -> notify cycle.
///
/// Used for logging and metrics only; no retry state is persisted across
/// cycles. A failed cycle leaves the system exactly as able to admit a fresh
/// trigger as a successful one (modulo cooldown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// All three steps succeeded; carries the uploaded artifact's public URL.
    Success(PublicReference),
    /// Image acquisition failed; upload and notify were never attempted.
    CaptureFailed,
    /// Upload failed; the local artifact is left in place, notify skipped.
    UploadFailed,
    /// Notification delivery failed after a successful upload.
    NotifyFailed,
}

impl CycleOutcome {
    /// Stable label for metrics and structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::CaptureFailed => "capture_failed",
            Self::UploadFailed => "upload_failed",
            Self::NotifyFailed => "notify_failed",
        }
    }

    /// True for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let success = CycleOutcome::Success(PublicReference::new("https://host/img1.jpg"));
        assert_eq!(success.label(), "success");
        assert!(success.is_success());
        assert_eq!(CycleOutcome::CaptureFailed.label(), "capture_failed");
        assert_eq!(CycleOutcome::UploadFailed.label(), "upload_failed");
        assert_eq!(CycleOutcome::NotifyFailed.label(), "notify_failed");
        assert!(!CycleOutcome::NotifyFailed.is_success());
    }
}
