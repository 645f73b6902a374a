//! Consumer manifest rebuild and atomic write.
//!
//! ## Update flow per consumer
//!
//! 1. Load `.devcontainer.json` (comment-tolerant).
//! 2. Match installed features against the resolved version map.
//! 3. Rebuild the `features` object from scratch, one pin per match,
//!    `common-utils` last.
//! 4. Serialize the whole document (2-space indent, trailing newline).
//! 5. Compare with current on-disk bytes → skip if identical.
//! 6. Write to `<path>.featpin.tmp`, rename to the final path
//!    (atomic on POSIX).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use featpin_core::{
    layout,
    manifest,
    types::{ConsumerName, FeatureId, FeatureRef},
    VersionMap, BASE_FEATURE,
};

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual manifest write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — rebuilt content matches what is on disk.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

/// Outcome of updating a single consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConsumerResult {
    pub consumer_name: String,
    pub write: WriteResult,
    /// Fully-qualified pins now present in the manifest, in insertion order.
    pub pins: Vec<String>,
}

// ---------------------------------------------------------------------------
// Rebuild
// ---------------------------------------------------------------------------

/// Feature ids referenced by the consumer's `features` object.
///
/// Returned in version-map (sorted id) order with [`BASE_FEATURE`] moved
/// last; the sort is stable so all other ids keep their relative order.
pub(crate) fn installed_features(
    features: &Map<String, Value>,
    versions: &VersionMap,
) -> Vec<FeatureId> {
    let mut installed: Vec<FeatureId> = versions
        .keys()
        .filter(|id| features.keys().any(|key| FeatureRef::references(key, id)))
        .cloned()
        .collect();
    installed.sort_by_key(|id| id.0 == BASE_FEATURE);
    installed
}

/// Load a consumer manifest and rebuild its `features` object against the
/// resolved versions.
///
/// Returns the serialized document sync would write and the pins it contains.
/// Every top-level field other than `features` round-trips verbatim, in its
/// original position.
pub(crate) fn render_consumer(
    path: &Path,
    versions: &VersionMap,
) -> Result<(String, Vec<String>), SyncError> {
    let mut doc = manifest::load_value_at(path)?;
    let Value::Object(ref mut fields) = doc else {
        return Err(SyncError::FeaturesNotObject {
            path: path.to_path_buf(),
        });
    };
    let Some(features) = fields.get("features").and_then(Value::as_object) else {
        return Err(SyncError::FeaturesNotObject {
            path: path.to_path_buf(),
        });
    };

    let mut pinned = Map::new();
    let mut pins = Vec::new();
    for id in installed_features(features, versions) {
        let version = versions[&id].clone();
        let key = FeatureRef { id, version }.key();
        pins.push(key.clone());
        pinned.insert(key, Value::Object(Map::new()));
    }

    // Replacing the value of an existing key keeps its position in the document.
    fields.insert("features".to_string(), Value::Object(pinned));

    let mut rendered = serde_json::to_string_pretty(&doc)?;
    rendered.push('\n');
    Ok((rendered, pins))
}

// ---------------------------------------------------------------------------
// sync_consumer / sync_all
// ---------------------------------------------------------------------------

/// Rebuild and write one consumer manifest against resolved versions.
pub fn sync_consumer(
    root: &Path,
    name: &ConsumerName,
    versions: &VersionMap,
    dry_run: bool,
) -> Result<SyncConsumerResult, SyncError> {
    let path = layout::consumer_manifest_path(root, name);
    let (rendered, pins) = render_consumer(&path, versions)?;
    let write = atomic_write(&path, &rendered, dry_run)?;
    Ok(SyncConsumerResult {
        consumer_name: name.0.clone(),
        write,
        pins,
    })
}

/// Update every consumer under `<root>/devcontainers`.
///
/// All feature manifests are resolved before the first consumer manifest is
/// touched. A failure aborts the loop; consumers already written stay written.
pub fn sync_all(root: &Path, dry_run: bool) -> Result<Vec<SyncConsumerResult>, SyncError> {
    let versions = featpin_core::versions::resolve_versions_at(root)?;
    let mut results = Vec::new();
    for name in layout::list_consumer_names(root)? {
        results.push(sync_consumer(root, &name, &versions, dry_run)?);
    }
    Ok(results)
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Atomically write a rebuilt manifest, skipping the write when content is
/// already identical on disk.
pub(crate) fn atomic_write(
    path: &Path,
    content: &str,
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    if read_existing(path)?.as_deref() == Some(content) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    let tmp = PathBuf::from(format!("{}.featpin.tmp", path.display()));
    std::fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

/// Current on-disk content, `None` if the file does not exist.
pub(crate) fn read_existing(path: &Path) -> Result<Option<String>, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
