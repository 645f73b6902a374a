//! Repository layout helpers.
//!
//! # Storage layout
//!
//! ```text
//! <root>/
//!   features/src/
//!     <feature_id>/devcontainer-feature.json   (one directory per feature)
//!   devcontainers/
//!     <consumer>/.devcontainer.json            (one directory per consumer)
//! ```
//!
//! Listings return directories only, sorted by name, so every run sees the
//! same order regardless of readdir order.

use std::path::{Path, PathBuf};

use crate::error::ManifestError;
use crate::types::{ConsumerName, FeatureId};

/// Manifest file name inside each feature directory.
pub const FEATURE_MANIFEST: &str = "devcontainer-feature.json";

/// Manifest file name inside each consumer directory.
pub const CONSUMER_MANIFEST: &str = ".devcontainer.json";

/// `<root>/features/src` — pure, no I/O.
pub fn features_root(root: &Path) -> PathBuf {
    root.join("features").join("src")
}

/// `<root>/devcontainers` — pure, no I/O.
pub fn consumers_root(root: &Path) -> PathBuf {
    root.join("devcontainers")
}

/// `<root>/features/src/<id>/devcontainer-feature.json` — pure, no I/O.
pub fn feature_manifest_path(root: &Path, id: &FeatureId) -> PathBuf {
    features_root(root).join(&id.0).join(FEATURE_MANIFEST)
}

/// `<root>/devcontainers/<name>/.devcontainer.json` — pure, no I/O.
pub fn consumer_manifest_path(root: &Path, name: &ConsumerName) -> PathBuf {
    consumers_root(root).join(&name.0).join(CONSUMER_MANIFEST)
}

/// List the feature directories under `<root>/features/src`, sorted by name.
pub fn list_feature_ids(root: &Path) -> Result<Vec<FeatureId>, ManifestError> {
    Ok(list_dirs(&features_root(root))?
        .into_iter()
        .map(FeatureId::from)
        .collect())
}

/// List the consumer directories under `<root>/devcontainers`, sorted by name.
pub fn list_consumer_names(root: &Path) -> Result<Vec<ConsumerName>, ManifestError> {
    Ok(list_dirs(&consumers_root(root))?
        .into_iter()
        .map(ConsumerName::from)
        .collect())
}

fn list_dirs(dir: &Path) -> Result<Vec<String>, ManifestError> {
    if !dir.exists() {
        return Err(ManifestError::RootNotFound {
            path: dir.to_path_buf(),
        });
    }
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
