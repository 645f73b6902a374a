//! `featpin sync` — re-pin consumer manifests to current feature versions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use featpin_core::layout;
use featpin_sync::{
    pipeline::{self, SyncScope},
    SyncConsumerResult, WriteResult,
};

/// Arguments for `featpin sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Name of a single consumer to update (default: every consumer).
    pub consumer: Option<String>,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Repository root containing `features/src` and `devcontainers`.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let scope = match &self.consumer {
            Some(name) => SyncScope::Consumer(name.clone()),
            None => SyncScope::All,
        };
        let results = pipeline::run(&self.root, scope, self.dry_run).context("sync failed")?;

        if results.is_empty() {
            println!(
                "No consumers found under {}.",
                layout::consumers_root(&self.root).display()
            );
            return Ok(());
        }
        for result in &results {
            print_result(result, self.dry_run);
        }
        Ok(())
    }
}

fn print_result(result: &SyncConsumerResult, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let verdict = match &result.write {
        WriteResult::Written { .. } => "updated",
        WriteResult::WouldWrite { .. } => "would update",
        WriteResult::Unchanged { .. } => "up to date",
    };
    println!(
        "{prefix}✓ '{}' {verdict} ({} pinned)",
        result.consumer_name,
        result.pins.len()
    );
    for pin in &result.pins {
        println!("    {pin}");
    }
}
