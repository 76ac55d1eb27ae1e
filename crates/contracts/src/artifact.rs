//! Cycle-local data handles: captured artifacts and their public references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque handle to a captured image on local storage.
///
/// Owned by the cycle that produced it until handed to the storage provider;
/// the pipeline never deletes the underlying file (retention is an external
/// concern).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureArtifact {
    path: PathBuf,
}

impl CaptureArtifact {
    /// Create an artifact handle from a local file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Local path of the captured image.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component, if the path has one.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

impl fmt::Display for CaptureArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Public URL of an uploaded artifact, consumed once by the notify provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicReference(String);

impl PublicReference {
    /// Create a reference from a URL string.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Get the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PublicReference {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl From<&str> for PublicReference {
    fn from(url: &str) -> Self {
        Self(url.to_string())
    }
}
