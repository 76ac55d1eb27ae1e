//! Provider traits - external capability interfaces invoked by a dispatch cycle
//!
//! Each step of the capture -> upload -> notify sequence is behind its own
//! trait so the dispatcher can be tested without hardware or network access.

use crate::{CaptureArtifact, MonitorError, PublicReference};

/// Image acquisition trait
///
/// Resolution and timing parameters (width, height, exposure, gain,
/// white-balance gains) are supplied to the implementation at construction.
#[trait_variant::make(CaptureProvider: Send)]
pub trait LocalCaptureProvider {
    /// Capture one image and return a handle to the local file.
    ///
    /// # Errors
    /// Returns `MonitorError::Capture` on acquisition failure; the cycle
    /// short-circuits without attempting upload or notify.
    async fn capture(&self) -> Result<CaptureArtifact, MonitorError>;
}

/// Remote object storage trait
///
/// The uploaded object must be publicly retrievable via the returned
/// reference.
#[trait_variant::make(StorageProvider: Send)]
pub trait LocalStorageProvider {
    /// Upload the artifact and return its public URL.
    ///
    /// # Errors
    /// Returns `MonitorError::Upload`; the local artifact is not deleted.
    async fn upload(&self, artifact: &CaptureArtifact) -> Result<PublicReference, MonitorError>;
}

/// Notification delivery trait
///
/// Message body is a fixed template plus timestamp plus the reference,
/// delivered to one preconfigured recipient.
#[trait_variant::make(NotifyProvider: Send)]
pub trait LocalNotifyProvider {
    /// Send the notification for one completed upload.
    ///
    /// # Errors
    /// Returns `MonitorError::Notify`.
    async fn notify(&self, reference: &PublicReference, timestamp: &str)
        -> Result<(), MonitorError>;
}
