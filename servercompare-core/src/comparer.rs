//! The source/target manifest comparer.
//!
//! # State per role
//!
//! ```text
//! Empty --load--> Populated --clear--> Empty
//! ```
//!
//! Loads replace the role's manifest wholesale; a failed load leaves it as it
//! was. [`ManifestComparer::compare`] requires both roles to be populated.

use std::path::Path;

use crate::error::CompareError;
use crate::manifest;
use crate::output::{DiffReport, OutputLayout};
use crate::types::{Manifest, Role};

/// Owns one manifest per [`Role`] and writes diff lists to an [`OutputLayout`].
///
/// Not meant for concurrent use; every mutation takes `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct ManifestComparer {
    source: Manifest,
    target: Manifest,
    layout: OutputLayout,
}

impl ManifestComparer {
    /// A comparer with empty manifests writing to `layout`.
    pub fn new(layout: OutputLayout) -> Self {
        Self {
            source: Manifest::new(),
            target: Manifest::new(),
            layout,
        }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn manifest(&self, role: Role) -> &Manifest {
        match role {
            Role::Source => &self.source,
            Role::Target => &self.target,
        }
    }

    fn manifest_mut(&mut self, role: Role) -> &mut Manifest {
        match role {
            Role::Source => &mut self.source,
            Role::Target => &mut self.target,
        }
    }

    /// Replace `role`'s manifest with a one-level scan of `dir`.
    pub fn load_from_directory(&mut self, role: Role, dir: &Path) -> Result<(), CompareError> {
        let scanned = manifest::scan_directory(dir)?;
        tracing::debug!("{role}: {} entries from {}", scanned.len(), dir.display());
        *self.manifest_mut(role) = scanned;
        Ok(())
    }

    /// Scan `dir` into `role`'s existing manifest. Names already present are
    /// replaced by the newly scanned entry.
    pub fn extend_from_directory(&mut self, role: Role, dir: &Path) -> Result<(), CompareError> {
        manifest::scan_directory_into(dir, self.manifest_mut(role))?;
        tracing::debug!("{role}: now {} entries", self.manifest(role).len());
        Ok(())
    }

    /// Replace `role`'s manifest with the contents of a saved manifest file.
    pub fn load_from_file(&mut self, role: Role, path: &Path) -> Result<(), CompareError> {
        let loaded = manifest::load(path)?;
        tracing::debug!("{role}: {} entries from {}", loaded.len(), path.display());
        *self.manifest_mut(role) = loaded;
        Ok(())
    }

    pub fn is_populated(&self, role: Role) -> bool {
        !self.manifest(role).is_empty()
    }

    pub fn clear(&mut self, role: Role) {
        self.manifest_mut(role).clear();
    }

    /// Write `role`'s manifest to `path`, overwriting any existing file.
    pub fn save_to_file(&self, role: Role, path: &Path) -> Result<(), CompareError> {
        self.require_populated(role)?;
        manifest::save(self.manifest(role), path)
    }

    /// Classify files and (re)write all three diff lists.
    ///
    /// Nothing is written unless both roles are populated.
    pub fn compare(&self) -> Result<DiffReport, CompareError> {
        for role in Role::all() {
            self.require_populated(*role)?;
        }
        let report = diff(&self.source, &self.target);
        tracing::info!(
            "compare: {} added, {} deleted, {} updated",
            report.added.len(),
            report.deleted.len(),
            report.updated.len()
        );
        report.write(&self.layout)?;
        Ok(report)
    }

    fn require_populated(&self, role: Role) -> Result<(), CompareError> {
        if self.is_populated(role) {
            Ok(())
        } else {
            Err(CompareError::NotPopulated { role })
        }
    }
}

/// Three-way classification by name.
///
/// `added` and `updated` follow `source` order and carry source paths;
/// `deleted` follows `target` order and carries target paths.
pub fn diff(source: &Manifest, target: &Manifest) -> DiffReport {
    let mut report = DiffReport::default();
    for entry in source {
        match target.get(&entry.name) {
            None => report.added.push(entry.path.clone()),
            Some(other) if other.fingerprint != entry.fingerprint => {
                report.updated.push(entry.path.clone())
            }
            Some(_) => {}
        }
    }
    report.deleted = target
        .iter()
        .filter(|e| !source.contains(&e.name))
        .map(|e| e.path.clone())
        .collect();
    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
