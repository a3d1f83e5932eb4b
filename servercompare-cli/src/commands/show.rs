//! `servercompare show <PATH> [--json]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use servercompare_core::{ManifestComparer, ManifestEntry, Role};

/// Arguments for `servercompare show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Directory to scan or manifest file to load.
    pub path: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "size")]
    size: u64,
    #[tabled(rename = "path")]
    path: String,
}

impl From<&ManifestEntry> for EntryRow {
    fn from(entry: &ManifestEntry) -> Self {
        Self {
            name: entry.name.clone(),
            size: entry.fingerprint.0,
            path: entry.path.display().to_string(),
        }
    }
}

impl ShowArgs {
    pub fn run(self) -> Result<()> {
        let mut comparer = ManifestComparer::default();
        super::load_role(&mut comparer, Role::Source, std::slice::from_ref(&self.path))?;
        let manifest = comparer.manifest(Role::Source);

        if self.json {
            let entries: Vec<&ManifestEntry> = manifest.iter().collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&entries).context("failed to serialize manifest JSON")?
            );
            return Ok(());
        }

        println!("{} ({} entries)", self.path.display().to_string().bold(), manifest.len());
        if manifest.is_empty() {
            return Ok(());
        }
        let mut table = Table::new(manifest.iter().map(EntryRow::from));
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
