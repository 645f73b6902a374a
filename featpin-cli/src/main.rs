//! Featpin — dev container feature version pin CLI.
//!
//! # Usage
//!
//! ```text
//! featpin sync [consumer] [--dry-run] [--root <path>]
//! featpin status [--json] [--root <path>]
//! featpin diff [consumer] [--root <path>]
//! featpin versions [--json] [--root <path>]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, status::StatusArgs, sync::SyncArgs, versions::VersionsArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "featpin",
    version,
    about = "Keep dev container feature version pins in sync",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Re-pin consumer manifests to current feature versions.
    Sync(SyncArgs),

    /// Show pin freshness across consumers.
    Status(StatusArgs),

    /// Show unified diff of what sync would write.
    Diff(DiffArgs),

    /// List features and their resolved versions.
    Versions(VersionsArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Versions(args) => args.run(),
    }
}
