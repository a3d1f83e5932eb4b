pub mod compare;
pub mod show;
pub mod snapshot;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use servercompare_core::{ManifestComparer, Role};

/// Populate `role` from `paths`.
///
/// Directories are scanned and merged in order (later names win). A manifest
/// file must be the only path given for its role.
pub fn load_role(comparer: &mut ManifestComparer, role: Role, paths: &[PathBuf]) -> Result<()> {
    let Some((first, rest)) = paths.split_first() else {
        bail!("no {role} path given");
    };

    if !first.exists() {
        bail!("{role} path not found: '{}'", first.display());
    }

    if !first.is_dir() {
        tracing::debug!("{role}: loading manifest file {}", first.display());
        if !rest.is_empty() {
            bail!("a {role} manifest file cannot be combined with other paths");
        }
        return comparer
            .load_from_file(role, first)
            .with_context(|| format!("failed to load {role} manifest '{}'", first.display()));
    }

    tracing::debug!("{role}: scanning {} director(ies)", paths.len());
    comparer
        .load_from_directory(role, first)
        .with_context(|| scan_context(role, first))?;
    for dir in rest {
        if !dir.is_dir() {
            bail!("{role} path '{}' is not a directory", dir.display());
        }
        comparer
            .extend_from_directory(role, dir)
            .with_context(|| scan_context(role, dir))?;
    }
    Ok(())
}

fn scan_context(role: Role, dir: &Path) -> String {
    format!("failed to scan {role} directory '{}'", dir.display())
}
