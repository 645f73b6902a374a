//! Error types for featpin-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::FeatureId;

/// All errors that can arise from manifest loading and version resolution.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (write/save path).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON parse error on load — includes file path and line context from serde_json.
    #[error("failed to parse manifest at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest file did not exist at the expected path.
    #[error("manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// The features or consumers root directory did not exist.
    #[error("directory not found: {path}")]
    RootNotFound { path: PathBuf },

    /// A feature manifest without a `version` field cannot be pinned.
    #[error("feature '{feature}' declares no version in {path}")]
    MissingVersion { feature: FeatureId, path: PathBuf },
}
