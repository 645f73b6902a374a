//! Error types for featpin-sync.

use std::path::PathBuf;

use thiserror::Error;

use featpin_core::error::ManifestError;

/// All errors that can arise from consumer updates.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from manifest loading or version resolution.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error while re-emitting a consumer manifest.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The named consumer has no directory under the consumers root.
    #[error("no consumer named '{name}' under {path}")]
    ConsumerNotFound { name: String, path: PathBuf },

    /// A consumer manifest whose `features` field is absent or not an object.
    #[error("manifest at {path} has no features object")]
    FeaturesNotObject { path: PathBuf },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
