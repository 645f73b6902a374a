//! Manifest-loader error-message and version-resolution integration tests.
//! Repository layout: <root>/features/src/<id>/devcontainer-feature.json

use assert_fs::prelude::*;
use featpin_core::{layout, manifest, versions, FeatureId, ManifestError};
use predicates::prelude::predicate;
use predicates::Predicate;

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_manifest_returns_not_found() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let path = layout::feature_manifest_path(root.path(), &FeatureId::from("bun"));
    let err = manifest::load_value_at(&path).unwrap_err();
    assert!(matches!(err, ManifestError::ManifestNotFound { .. }), "got: {err}");
    assert!(predicate::str::contains("manifest not found").eval(&err.to_string()));
    assert!(predicate::str::contains("devcontainer-feature.json").eval(&err.to_string()));
}

#[test]
fn load_corrupt_json_returns_parse_error_with_path() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("features/src/bun/devcontainer-feature.json")
        .write_str("{\"id\": \"bun\", \"version\": [unclosed\n")
        .expect("write");

    let path = layout::feature_manifest_path(root.path(), &FeatureId::from("bun"));
    let err = manifest::load_value_at(&path).unwrap_err();
    assert!(matches!(err, ManifestError::Parse { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("devcontainer-feature.json"), "must contain file path, got: {msg}");
    let source_msg = match &err {
        ManifestError::Parse { source, .. } => source.to_string(),
        _ => unreachable!(),
    };
    assert!(!source_msg.is_empty(), "serde_json must provide error context");
}

#[test]
fn load_wrong_type_json_returns_parse_error() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("features/src/bun/devcontainer-feature.json")
        .write_str("[\"this is a list, not an object\"]\n")
        .expect("write");

    let path = layout::feature_manifest_path(root.path(), &FeatureId::from("bun"));
    let err = manifest::load_at::<featpin_core::FeatureManifest>(&path).unwrap_err();
    assert!(matches!(err, ManifestError::Parse { .. }), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Comment tolerance
// ---------------------------------------------------------------------------

#[test]
fn full_line_comments_are_ignored() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("features/src/bun/devcontainer-feature.json")
        .write_str(concat!(
            "// https://containers.dev/implementors/features/\n",
            "{\n",
            "  // bump on release\n",
            "  \"id\": \"bun\",\n",
            "  \"version\": \"1.0.2\"\n",
            "}\n",
        ))
        .expect("write");

    let versions = versions::resolve_versions_at(root.path()).expect("resolve");
    assert_eq!(versions[&FeatureId::from("bun")], "1.0.2");
}

// ---------------------------------------------------------------------------
// 3. Version resolution
// ---------------------------------------------------------------------------

#[test]
fn resolution_is_sorted_and_deterministic() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    // Create zsh before bun intentionally.
    root.child("features/src/zsh/devcontainer-feature.json")
        .write_str(r#"{"version":"3.0.0"}"#)
        .expect("write");
    root.child("features/src/bun/devcontainer-feature.json")
        .write_str(r#"{"version":"1.0.2"}"#)
        .expect("write");

    let versions = versions::resolve_versions_at(root.path()).expect("resolve");
    let ids: Vec<&FeatureId> = versions.keys().collect();
    assert_eq!(ids, vec![&FeatureId::from("bun"), &FeatureId::from("zsh")]);
}

#[test]
fn missing_version_error_names_feature_and_path() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("features/src/bun/devcontainer-feature.json")
        .write_str(r#"{"id":"bun","name":"Bun"}"#)
        .expect("write");

    let err = versions::resolve_versions_at(root.path()).unwrap_err();
    assert!(matches!(err, ManifestError::MissingVersion { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(predicate::str::contains("'bun'").eval(&msg), "got: {msg}");
    assert!(predicate::str::contains("declares no version").eval(&msg), "got: {msg}");
}

#[test]
fn missing_features_root_is_an_error() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let err = versions::resolve_versions_at(root.path()).unwrap_err();
    assert!(matches!(err, ManifestError::RootNotFound { .. }), "got: {err}");
}
