//! Diff results and where they are written.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::CompareError;
use crate::writer;

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const ADD_FILE_NAME: &str = "target_add.txt";
pub const DELETE_FILE_NAME: &str = "target_del.txt";
pub const UPDATE_FILE_NAME: &str = "target_upd.txt";

/// Locations of the three diff lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub add: PathBuf,
    pub delete: PathBuf,
    pub update: PathBuf,
}

impl OutputLayout {
    /// Default file names inside `dir`. Pure, no I/O.
    pub fn at(dir: &Path) -> Self {
        Self {
            add: dir.join(ADD_FILE_NAME),
            delete: dir.join(DELETE_FILE_NAME),
            update: dir.join(UPDATE_FILE_NAME),
        }
    }

    pub fn paths(&self) -> [&Path; 3] {
        [&self.add, &self.delete, &self.update]
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::at(Path::new(DEFAULT_OUTPUT_DIR))
    }
}

/// Outcome of a three-way comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    /// Source paths of files missing from the target.
    pub added: Vec<PathBuf>,
    /// Target paths of files missing from the source.
    pub deleted: Vec<PathBuf>,
    /// Source paths of files on both sides whose fingerprints differ.
    pub updated: Vec<PathBuf>,
}

impl DiffReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.updated.is_empty()
    }

    pub fn total(&self) -> usize {
        self.added.len() + self.deleted.len() + self.updated.len()
    }

    /// Write all three lists. Every file is rewritten, empty lists included.
    ///
    /// Lists are written add, delete, update, stopping at the first failure:
    /// lists before it are already replaced, lists after it are untouched.
    pub fn write(&self, layout: &OutputLayout) -> Result<(), CompareError> {
        write_paths(&layout.add, &self.added)?;
        write_paths(&layout.delete, &self.deleted)?;
        write_paths(&layout.update, &self.updated)?;
        Ok(())
    }
}

fn write_paths(path: &Path, paths: &[PathBuf]) -> Result<(), CompareError> {
    writer::write_lines(path, paths.iter().map(|p| p.to_string_lossy()))
}
