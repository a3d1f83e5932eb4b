//! servercompare: diff two directory trees by file name and size.
//!
//! # Usage
//!
//! ```text
//! servercompare snapshot <DIR>... --output <FILE>
//! servercompare compare --source <PATH>... --target <PATH>... [--output-dir <DIR>] [--json]
//! servercompare show <PATH> [--json]
//! ```
//!
//! A `<PATH>` is either a directory (scanned one level deep) or a manifest
//! file written by `snapshot`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{compare::CompareArgs, show::ShowArgs, snapshot::SnapshotArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "servercompare",
    version,
    about = "Compare a source and target directory and list files to add, delete and update",
    long_about = None,
)]
struct Cli {
    /// Log debug detail to stderr (overridden by RUST_LOG).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan directories and save their manifest to a file.
    Snapshot(SnapshotArgs),

    /// Diff a source and target and write the add/delete/update lists.
    Compare(CompareArgs),

    /// Print a manifest built from a directory or loaded from a file.
    Show(ShowArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Snapshot(args) => args.run(),
        Commands::Compare(args) => args.run(),
        Commands::Show(args) => args.run(),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
