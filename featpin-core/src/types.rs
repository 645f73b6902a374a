//! Domain types for featpin.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! All types are serializable/deserializable via serde + serde_json.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Registry namespace under which every feature is published.
pub const FEATURE_NAMESPACE: &str = "ghcr.io/onezerocompany/devcontainers/features";

/// Feature that must be installed after every other feature.
pub const BASE_FEATURE: &str = "common-utils";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a feature directory under the features root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(pub String);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for FeatureId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FeatureId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed name for a consumer directory under the consumers root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsumerName(pub String);

impl fmt::Display for ConsumerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ConsumerName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ConsumerName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Metadata a feature declares in its `devcontainer-feature.json`.
///
/// Only the fields featpin reads; everything else in the manifest is ignored.
/// `version` is optional at parse time — resolution turns its absence into an
/// explicit error rather than pinning an empty version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FeatureManifest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// A fully-qualified, versioned feature reference — one pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRef {
    pub id: FeatureId,
    pub version: String,
}

impl FeatureRef {
    /// `<namespace>/<id>:<version>` — the key format used in consumer manifests.
    pub fn key(&self) -> String {
        format!("{FEATURE_NAMESPACE}/{}:{}", self.id, self.version)
    }

    /// Whether `key` references `id`, ignoring the pinned version.
    ///
    /// The key must be `<namespace>/<id>` exactly or continue with a `:`
    /// version separator, so a reference to `foo-extended` never matches `foo`.
    pub fn references(key: &str, id: &FeatureId) -> bool {
        let unversioned = format!("{FEATURE_NAMESPACE}/{}", id.0);
        match key.strip_prefix(unversioned.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with(':'),
            None => false,
        }
    }
}

impl fmt::Display for FeatureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
