//! Comment-tolerant JSON manifest loading.
//!
//! Dev container manifests allow full-line `//` comments. The loader drops
//! every line whose leading-whitespace-trimmed content starts with `//` and
//! parses the remainder as plain JSON. Comments are not preserved across a
//! rewrite — the writer always emits fresh JSON.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ManifestError;

/// Remove full-line `//` comments.
///
/// Only whole lines are dropped. A `//` after content on a line is kept as-is
/// (it may sit inside a string value).
pub fn strip_comments(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Load a manifest file into a generic JSON value.
///
/// Returns `ManifestError::ManifestNotFound` if absent,
/// `ManifestError::Parse` (with path + line context) if malformed JSON.
pub fn load_value_at(path: &Path) -> Result<Value, ManifestError> {
    let contents = read_manifest(path)?;
    serde_json::from_str(&strip_comments(&contents)).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a manifest file into a typed structure.
pub fn load_at<T: DeserializeOwned>(path: &Path) -> Result<T, ManifestError> {
    let contents = read_manifest(path)?;
    serde_json::from_str(&strip_comments(&contents)).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
