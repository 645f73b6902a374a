//! `featpin diff [consumer]` — show unified diffs for what sync would write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use featpin_core::{types::ConsumerName, versions};
use featpin_sync::{diff_all, diff_consumer, FileDiff};

/// Arguments for `featpin diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Consumer name to diff (default: every consumer).
    pub consumer: Option<String>,

    /// Repository root containing `features/src` and `devcontainers`.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let diffs: Vec<FileDiff> = match &self.consumer {
            Some(name) => {
                let versions = versions::resolve_versions_at(&self.root)
                    .context("failed to resolve feature versions")?;
                diff_consumer(&self.root, &ConsumerName::from(name.as_str()), &versions)
                    .with_context(|| format!("diff failed for '{name}'"))?
                    .into_iter()
                    .collect()
            }
            None => diff_all(&self.root).context("diff failed")?,
        };

        if diffs.is_empty() {
            println!("No differences.");
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }
}
