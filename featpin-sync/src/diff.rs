//! Dry-run unified diff support for `featpin diff`.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use featpin_core::{layout, types::ConsumerName, versions, VersionMap};

use crate::update::{read_existing, render_consumer};
use crate::SyncError;

/// A unified diff of what sync would write for one consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Render what `sync` would write and compare it to current on-disk content.
///
/// Returns `None` when the manifest is already up to date. No files written.
pub fn diff_consumer(
    root: &Path,
    name: &ConsumerName,
    versions: &VersionMap,
) -> Result<Option<FileDiff>, SyncError> {
    let path = layout::consumer_manifest_path(root, name);
    let (rendered, _pins) = render_consumer(&path, versions)?;
    let existing = read_existing(&path)?.unwrap_or_default();
    if existing == rendered {
        return Ok(None);
    }

    let relative = PathBuf::from(&name.0).join(layout::CONSUMER_MANIFEST);
    let old_header = format!("a/{}", relative.display());
    let new_header = format!("b/{}", relative.display());
    let unified = TextDiff::from_lines(&existing, &rendered)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();

    Ok(Some(FileDiff {
        path,
        unified_diff: unified,
    }))
}

/// Diff every consumer under the consumers root.
pub fn diff_all(root: &Path) -> Result<Vec<FileDiff>, SyncError> {
    let versions = versions::resolve_versions_at(root)?;
    let mut diffs = Vec::new();
    for name in layout::list_consumer_names(root)? {
        if let Some(diff) = diff_consumer(root, &name, &versions)? {
            diffs.push(diff);
        }
    }
    Ok(diffs)
}
