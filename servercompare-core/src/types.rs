//! Domain types for manifests.
//!
//! All path fields use `PathBuf`; names are the UTF-8 (lossy) base filename.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Cheap content-identity proxy for a file: its size in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
pub struct Fingerprint(pub u64);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for Fingerprint {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which side of a comparison a manifest belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Source,
    Target,
}

impl Role {
    pub fn all() -> &'static [Role] {
        &[Role::Source, Role::Target]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Source => write!(f, "source"),
            Role::Target => write!(f, "target"),
        }
    }
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// A single file recorded in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub name: String,
    pub fingerprint: Fingerprint,
    /// Absolute path of the file on disk.
    pub path: PathBuf,
}

impl ManifestEntry {
    pub fn new(
        name: impl Into<String>,
        fingerprint: u64,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            fingerprint: Fingerprint(fingerprint),
            path: path.into(),
        }
    }
}

/// Insertion-ordered map of `name → (fingerprint, path)`.
///
/// Inserting an existing name replaces its value in place, keeping the
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
    index: HashMap<String, usize>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Returns the previous entry for that name.
    pub fn insert(&mut self, entry: ManifestEntry) -> Option<ManifestEntry> {
        match self.index.get(&entry.name) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i], entry)),
            None => {
                self.index.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

impl FromIterator<ManifestEntry> for Manifest {
    fn from_iter<I: IntoIterator<Item = ManifestEntry>>(iter: I) -> Self {
        let mut manifest = Manifest::new();
        manifest.extend(iter);
        manifest
    }
}

impl Extend<ManifestEntry> for Manifest {
    fn extend<I: IntoIterator<Item = ManifestEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display() {
        assert_eq!(Role::Source.to_string(), "source");
        assert_eq!(Role::Target.to_string(), "target");
    }

    #[test]
    fn insert_keeps_insertion_order() {
        let manifest: Manifest = ["b.txt", "a.txt", "c.txt"]
            .iter()
            .map(|n| ManifestEntry::new(*n, 1, format!("/data/{n}")))
            .collect();
        let names: Vec<_> = manifest.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b.txt", "a.txt", "c.txt"]);
    }

    #[test]
    fn collision_last_wins_in_first_position() {
        let mut manifest = Manifest::new();
        manifest.insert(ManifestEntry::new("a.txt", 1, "/one/a.txt"));
        manifest.insert(ManifestEntry::new("b.txt", 2, "/one/b.txt"));
        let prev = manifest.insert(ManifestEntry::new("a.txt", 7, "/two/a.txt"));

        assert_eq!(prev.map(|e| e.fingerprint), Some(Fingerprint(1)));
        assert_eq!(manifest.len(), 2);
        let first = manifest.iter().next().unwrap();
        assert_eq!(first.name, "a.txt");
        assert_eq!(first.fingerprint, Fingerprint(7));
        assert_eq!(first.path, PathBuf::from("/two/a.txt"));
    }

    #[test]
    fn clear_empties_index_too() {
        let mut manifest = Manifest::new();
        manifest.insert(ManifestEntry::new("a.txt", 1, "/a.txt"));
        manifest.clear();
        assert!(manifest.is_empty());
        assert!(!manifest.contains("a.txt"));
    }
}
