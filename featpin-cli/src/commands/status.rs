//! `featpin status` — pin freshness visibility.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use featpin_sync::{status, ConsumerStatus, PinSignal};

/// Arguments for `featpin status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// Repository root containing `features/src` and `devcontainers`.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let statuses = status::check_all(&self.root).context("status check failed")?;

        if self.json {
            print_json(&statuses)?;
            return Ok(());
        }
        print_table(&statuses);
        Ok(())
    }
}

#[derive(Serialize)]
struct StatusReportJson {
    summary: StatusSummaryJson,
    consumers: Vec<ConsumerStatusJson>,
}

#[derive(Serialize)]
struct StatusSummaryJson {
    consumers: usize,
    outdated: usize,
}

#[derive(Serialize)]
struct ConsumerStatusJson {
    consumer: String,
    status: String,
    detail: String,
    modified: String,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "consumer")]
    consumer: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "detail")]
    detail: String,
    #[tabled(rename = "modified")]
    modified: String,
}

fn count_outdated(statuses: &[ConsumerStatus]) -> usize {
    statuses
        .iter()
        .filter(|s| !matches!(s.signal, PinSignal::Current))
        .count()
}

fn print_json(statuses: &[ConsumerStatus]) -> Result<()> {
    let payload = StatusReportJson {
        summary: StatusSummaryJson {
            consumers: statuses.len(),
            outdated: count_outdated(statuses),
        },
        consumers: statuses
            .iter()
            .map(|s| ConsumerStatusJson {
                consumer: s.consumer_name.clone(),
                status: signal_key(&s.signal).to_string(),
                detail: signal_detail(&s.signal),
                modified: s.modified_age.clone(),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(statuses: &[ConsumerStatus]) {
    println!(
        "Featpin v{} | {} consumers | {} outdated",
        env!("CARGO_PKG_VERSION"),
        statuses.len(),
        count_outdated(statuses),
    );

    if statuses.is_empty() {
        println!("No consumers found.");
        return;
    }

    let rows: Vec<StatusTableRow> = statuses
        .iter()
        .map(|s| StatusTableRow {
            consumer: s.consumer_name.clone(),
            status: signal_label(&s.signal),
            detail: signal_detail(&s.signal),
            modified: s.modified_age.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if count_outdated(statuses) > 0 {
        println!("Run 'featpin sync' to update outdated consumers.");
    }
}

fn signal_key(signal: &PinSignal) -> &'static str {
    match signal {
        PinSignal::Current => "current",
        PinSignal::Outdated { .. } => "outdated",
        PinSignal::MissingManifest => "missing_manifest",
    }
}

fn signal_label(signal: &PinSignal) -> String {
    match signal {
        PinSignal::Current => "CURRENT".green().bold().to_string(),
        PinSignal::Outdated { .. } => "OUTDATED".yellow().bold().to_string(),
        PinSignal::MissingManifest => "MISSING".red().bold().to_string(),
    }
}

fn signal_detail(signal: &PinSignal) -> String {
    match signal {
        PinSignal::Current => "up to date".to_string(),
        PinSignal::Outdated { stale } if stale.is_empty() => "formatting only".to_string(),
        PinSignal::Outdated { stale } => format!("{} to re-pin", summarize_pins(stale)),
        PinSignal::MissingManifest => "no .devcontainer.json".to_string(),
    }
}

fn summarize_pins(pins: &[String]) -> String {
    let mut shown: Vec<String> = pins
        .iter()
        .take(2)
        .map(|pin| short_pin(pin).to_string())
        .collect();
    if pins.len() > shown.len() {
        shown.push(format!("+{} more", pins.len() - shown.len()));
    }
    shown.join(", ")
}

/// `<id>:<version>` tail of a fully-qualified pin, for compact table cells.
fn short_pin(pin: &str) -> &str {
    pin.rsplit('/').next().unwrap_or(pin)
}
