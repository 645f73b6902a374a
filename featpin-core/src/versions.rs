//! Feature version resolution.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ManifestError;
use crate::layout;
use crate::manifest;
use crate::types::{FeatureId, FeatureManifest};

/// Resolved feature-id → version mapping for one run.
///
/// `BTreeMap` keeps iteration in feature-id order, which later fixes the pin
/// order in rebuilt consumer manifests.
pub type VersionMap = BTreeMap<FeatureId, String>;

/// Read every feature manifest under `<root>/features/src` and return the
/// versions they declare.
///
/// Built once per run and passed by reference into the update phase. A
/// feature manifest without a `version` field fails the whole run; an empty
/// version string cannot be pinned.
pub fn resolve_versions_at(root: &Path) -> Result<VersionMap, ManifestError> {
    let mut versions = VersionMap::new();
    for id in layout::list_feature_ids(root)? {
        let path = layout::feature_manifest_path(root, &id);
        let feature: FeatureManifest = manifest::load_at(&path)?;
        let version = feature
            .version
            .ok_or_else(|| ManifestError::MissingVersion {
                feature: id.clone(),
                path: path.clone(),
            })?;
        versions.insert(id, version);
    }
    Ok(versions)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
