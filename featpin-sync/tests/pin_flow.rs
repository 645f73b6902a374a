//! End-to-end pin flow: sync → status → feature bump → diff → sync.

use std::fs;
use std::path::Path;

use featpin_core::{layout, types::ConsumerName, FEATURE_NAMESPACE};
use featpin_sync::{check_all, diff_all, sync_all, PinSignal, WriteResult};
use tempfile::TempDir;

fn write_feature(root: &Path, id: &str, version: &str) {
    let dir = layout::features_root(root).join(id);
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(
        dir.join(layout::FEATURE_MANIFEST),
        format!("// managed by release automation\n{{\"id\":\"{id}\",\"version\":\"{version}\"}}\n"),
    )
    .expect("write feature");
}

fn write_consumer(root: &Path, name: &str, features: &[(&str, &str)]) {
    let dir = layout::consumers_root(root).join(name);
    fs::create_dir_all(&dir).expect("mkdir");
    let entries: Vec<String> = features
        .iter()
        .map(|(id, version)| format!("\"{FEATURE_NAMESPACE}/{id}:{version}\": {{}}"))
        .collect();
    fs::write(
        dir.join(layout::CONSUMER_MANIFEST),
        format!(
            "{{\n  \"name\": \"{name}\",\n  \"image\": \"mcr.example/base:jammy\",\n  \"features\": {{ {} }}\n}}\n",
            entries.join(", ")
        ),
    )
    .expect("write consumer");
}

#[test]
fn full_flow_pins_bumps_and_settles() {
    let root = TempDir::new().expect("tempdir");
    write_feature(root.path(), "bun", "1.0.2");
    write_feature(root.path(), "common-utils", "2.1.0");
    write_consumer(
        root.path(),
        "dev",
        &[("common-utils", "0.0.1"), ("bun", "0.0.1")],
    );

    // First sync rewrites the consumer.
    let results = sync_all(root.path(), false).expect("first sync");
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0].write, WriteResult::Written { .. }));
    assert_eq!(
        results[0].pins,
        vec![
            format!("{FEATURE_NAMESPACE}/bun:1.0.2"),
            format!("{FEATURE_NAMESPACE}/common-utils:2.1.0"),
        ]
    );

    // Status settles to current; diff is empty.
    let statuses = check_all(root.path()).expect("status");
    assert_eq!(statuses[0].signal, PinSignal::Current);
    assert!(diff_all(root.path()).expect("diff").is_empty());

    // A feature release makes the consumer outdated again.
    write_feature(root.path(), "bun", "1.1.0");
    let statuses = check_all(root.path()).expect("status");
    match &statuses[0].signal {
        PinSignal::Outdated { stale } => {
            assert_eq!(stale, &vec![format!("{FEATURE_NAMESPACE}/bun:1.1.0")]);
        }
        other => panic!("expected outdated, got {other:?}"),
    }

    let diffs = diff_all(root.path()).expect("diff");
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].unified_diff.contains("-    \"ghcr.io"));
    assert!(diffs[0].unified_diff.contains("bun:1.1.0"));

    // Second sync settles everything again.
    sync_all(root.path(), false).expect("second sync");
    assert!(diff_all(root.path()).expect("diff").is_empty());

    let path = layout::consumer_manifest_path(root.path(), &ConsumerName::from("dev"));
    let content = fs::read_to_string(&path).expect("read");
    assert!(content.contains("bun:1.1.0"));
    assert!(!content.contains("bun:1.0.2"));
    assert!(content.contains("\"image\": \"mcr.example/base:jammy\""));
}

#[test]
fn failure_mid_run_leaves_earlier_consumers_written() {
    let root = TempDir::new().expect("tempdir");
    write_feature(root.path(), "bun", "1.0.2");
    write_consumer(root.path(), "alpha", &[("bun", "0.0.1")]);

    // "omega" sorts after "alpha" and has a broken manifest.
    let dir = layout::consumers_root(root.path()).join("omega");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join(layout::CONSUMER_MANIFEST), "{ not json").expect("write");

    sync_all(root.path(), false).expect_err("omega must abort the run");

    // alpha was processed before the failure and keeps its update.
    let alpha = layout::consumer_manifest_path(root.path(), &ConsumerName::from("alpha"));
    let content = fs::read_to_string(&alpha).expect("read");
    assert!(content.contains("bun:1.0.2"));
}
