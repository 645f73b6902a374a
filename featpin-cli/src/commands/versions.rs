//! `featpin versions` — resolved feature versions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use featpin_core::versions;

/// Arguments for `featpin versions`.
#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// Repository root containing `features/src` and `devcontainers`.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Tabled)]
struct VersionRow {
    #[tabled(rename = "feature")]
    feature: String,
    #[tabled(rename = "version")]
    version: String,
}

#[derive(Serialize)]
struct VersionJson {
    feature: String,
    version: String,
}

impl VersionsArgs {
    pub fn run(self) -> Result<()> {
        let versions = versions::resolve_versions_at(&self.root)
            .context("failed to resolve feature versions")?;

        if self.json {
            let payload: Vec<VersionJson> = versions
                .iter()
                .map(|(id, version)| VersionJson {
                    feature: id.0.clone(),
                    version: version.clone(),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload)
                    .context("failed to serialize versions JSON")?
            );
            return Ok(());
        }

        if versions.is_empty() {
            println!("No features found.");
            return Ok(());
        }

        let rows: Vec<VersionRow> = versions
            .iter()
            .map(|(id, version)| VersionRow {
                feature: id.0.clone(),
                version: version.clone(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
