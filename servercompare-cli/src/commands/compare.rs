//! `servercompare compare --source <PATH>... --target <PATH>...`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use servercompare_core::{output::DEFAULT_OUTPUT_DIR, DiffReport, ManifestComparer, OutputLayout, Role};

/// Arguments for `servercompare compare`.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Source directories, or a single source manifest file.
    #[arg(long, short = 's', required = true, num_args = 1..)]
    pub source: Vec<PathBuf>,

    /// Target directories, or a single target manifest file.
    #[arg(long, short = 't', required = true, num_args = 1..)]
    pub target: Vec<PathBuf>,

    /// Directory for the add/delete/update lists.
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Override the add-list path.
    #[arg(long)]
    pub add_file: Option<PathBuf>,

    /// Override the delete-list path.
    #[arg(long)]
    pub delete_file: Option<PathBuf>,

    /// Override the update-list path.
    #[arg(long)]
    pub update_file: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ComparePayload<'a> {
    outputs: OutputsPayload<'a>,
    #[serde(flatten)]
    report: &'a DiffReport,
}

#[derive(Serialize)]
struct OutputsPayload<'a> {
    add: &'a PathBuf,
    delete: &'a PathBuf,
    update: &'a PathBuf,
}

impl CompareArgs {
    pub fn layout(&self) -> OutputLayout {
        let defaults = OutputLayout::at(&self.output_dir);
        OutputLayout {
            add: self.add_file.clone().unwrap_or(defaults.add),
            delete: self.delete_file.clone().unwrap_or(defaults.delete),
            update: self.update_file.clone().unwrap_or(defaults.update),
        }
    }

    pub fn run(self) -> Result<()> {
        let mut comparer = ManifestComparer::new(self.layout());
        super::load_role(&mut comparer, Role::Source, &self.source)?;
        super::load_role(&mut comparer, Role::Target, &self.target)?;

        let report = comparer.compare().context("compare failed")?;
        let layout = comparer.layout();

        if self.json {
            let payload = ComparePayload {
                outputs: OutputsPayload {
                    add: &layout.add,
                    delete: &layout.delete,
                    update: &layout.update,
                },
                report: &report,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize compare JSON")?
            );
            return Ok(());
        }

        print_summary(&report, layout);
        Ok(())
    }
}

fn print_summary(report: &DiffReport, layout: &OutputLayout) {
    if report.is_empty() {
        println!("{} Source and target match", "✓".green().bold());
    } else {
        println!(
            "{} {} differences ({} add, {} delete, {} update)",
            "■".yellow().bold(),
            report.total(),
            report.added.len(),
            report.deleted.len(),
            report.updated.len()
        );
    }

    let rows = [
        ("+".green(), report.added.len(), &layout.add),
        ("-".red(), report.deleted.len(), &layout.delete),
        ("~".yellow(), report.updated.len(), &layout.update),
    ];
    for (marker, count, path) in rows {
        println!("  {marker}  {count:>5}  {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CompareArgs {
        CompareArgs {
            source: vec![PathBuf::from("src")],
            target: vec![PathBuf::from("tgt")],
            output_dir: PathBuf::from("out"),
            add_file: None,
            delete_file: None,
            update_file: None,
            json: false,
        }
    }

    #[test]
    fn layout_defaults_to_output_dir() {
        assert_eq!(args().layout(), OutputLayout::at(&PathBuf::from("out")));
    }

    #[test]
    fn layout_overrides_single_file() {
        let mut args = args();
        args.update_file = Some(PathBuf::from("/elsewhere/upd.txt"));
        let layout = args.layout();
        assert_eq!(layout.update, PathBuf::from("/elsewhere/upd.txt"));
        assert_eq!(layout.add, PathBuf::from("out").join("target_add.txt"));
    }
}
