//! Per-consumer pin status.
//!
//! Signal precedence:
//! 1. `MissingManifest` (consumer directory has no `.devcontainer.json`)
//! 2. `Outdated` (on-disk content differs from what sync would write)
//! 3. `Current`

use std::path::Path;
use std::time::{Duration, SystemTime};

use serde_json::Value;

use featpin_core::{layout, manifest, types::ConsumerName, versions, VersionMap};

use crate::error::io_err;
use crate::update::{read_existing, render_consumer};
use crate::SyncError;

/// Pin freshness classification for a consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinSignal {
    Current,
    /// `stale` lists the target pins not yet present verbatim in the manifest;
    /// empty when only formatting differs.
    Outdated { stale: Vec<String> },
    MissingManifest,
}

/// Status of one consumer manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerStatus {
    pub consumer_name: String,
    pub signal: PinSignal,
    /// Compact age of the manifest's last modification, `"never"` if absent.
    pub modified_age: String,
}

/// Check one consumer against the resolved versions.
pub fn check(
    root: &Path,
    name: &ConsumerName,
    versions: &VersionMap,
) -> Result<ConsumerStatus, SyncError> {
    let path = layout::consumer_manifest_path(root, name);
    if !path.exists() {
        return Ok(ConsumerStatus {
            consumer_name: name.0.clone(),
            signal: PinSignal::MissingManifest,
            modified_age: "never".to_string(),
        });
    }

    let meta = std::fs::metadata(&path).map_err(|e| io_err(&path, e))?;
    let modified_age = meta
        .modified()
        .map(format_system_time_age)
        .unwrap_or_else(|_| "unknown".to_string());

    let (rendered, pins) = render_consumer(&path, versions)?;
    let existing = read_existing(&path)?.unwrap_or_default();
    if existing == rendered {
        return Ok(ConsumerStatus {
            consumer_name: name.0.clone(),
            signal: PinSignal::Current,
            modified_age,
        });
    }

    let stale = stale_pins(&path, &pins)?;
    Ok(ConsumerStatus {
        consumer_name: name.0.clone(),
        signal: PinSignal::Outdated { stale },
        modified_age,
    })
}

/// Check every consumer under the consumers root.
pub fn check_all(root: &Path) -> Result<Vec<ConsumerStatus>, SyncError> {
    let versions = versions::resolve_versions_at(root)?;
    let mut statuses = Vec::new();
    for name in layout::list_consumer_names(root)? {
        statuses.push(check(root, &name, &versions)?);
    }
    Ok(statuses)
}

/// Target pins missing from the manifest's current `features` keys.
fn stale_pins(path: &Path, pins: &[String]) -> Result<Vec<String>, SyncError> {
    let doc = manifest::load_value_at(path)?;
    let current: Vec<String> = doc
        .get("features")
        .and_then(Value::as_object)
        .map(|features| features.keys().cloned().collect())
        .unwrap_or_default();
    Ok(pins
        .iter()
        .filter(|pin| !current.iter().any(|key| &key == pin))
        .cloned()
        .collect())
}

/// Format age from a filesystem timestamp.
pub fn format_system_time_age(timestamp: SystemTime) -> String {
    let age = SystemTime::now()
        .duration_since(timestamp)
        .unwrap_or_default();
    format_duration(age)
}

fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();
    if seconds < 60 {
        return format!("{seconds}s");
    }
    if seconds < 60 * 60 {
        return format!("{}m", seconds / 60);
    }
    if seconds < 60 * 60 * 24 {
        return format!("{}h", seconds / (60 * 60));
    }
    format!("{}d", seconds / (60 * 60 * 24))
}
