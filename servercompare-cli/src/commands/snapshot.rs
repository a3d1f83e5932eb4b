//! `servercompare snapshot <DIR>... --output <FILE>`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use servercompare_core::{ManifestComparer, Role};

/// Scan one or more directories and save the manifest.
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Directories to scan; later directories win on duplicate file names.
    #[arg(required = true)]
    pub dirs: Vec<PathBuf>,

    /// Manifest file to write (overwritten if it exists).
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

impl SnapshotArgs {
    pub fn run(self) -> Result<()> {
        let mut comparer = ManifestComparer::default();
        for dir in &self.dirs {
            if !dir.is_dir() {
                anyhow::bail!("'{}' is not a directory", dir.display());
            }
        }
        super::load_role(&mut comparer, Role::Source, &self.dirs)?;
        comparer
            .save_to_file(Role::Source, &self.output)
            .with_context(|| format!("failed to write manifest '{}'", self.output.display()))?;

        println!(
            "{} Saved {} entries to {}",
            "✓".green().bold(),
            comparer.manifest(Role::Source).len(),
            self.output.display()
        );
        Ok(())
    }
}
