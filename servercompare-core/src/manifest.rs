//! Building, parsing and saving manifests.
//!
//! # File format
//!
//! ```text
//! <filename>|<fingerprint>|<absolute path>
//! ```
//!
//! One entry per line, no header. Lines are split on the first two `|`, so a
//! path may contain `|` but a filename may not. Names or paths that are not
//! valid UTF-8 are written lossily and will not round-trip.

use std::path::{Path, PathBuf};

use crate::error::{io_err, CompareError};
use crate::types::{Manifest, ManifestEntry};
use crate::writer;

const FIELD_SEPARATOR: char = '|';

// ---------------------------------------------------------------------------
// 1. Directory scan
// ---------------------------------------------------------------------------

/// Scan `dir` one level deep and return a manifest of its regular files.
///
/// Entries are visited in filename order. Subdirectories and entries whose
/// metadata cannot be read (e.g. dangling symlinks) are skipped. Symlinks to
/// regular files are followed and recorded under the link's name.
///
/// Returns `CompareError::PathNotFound` if `dir` is absent and
/// `CompareError::EmptyDirectory` if it holds no regular files.
pub fn scan_directory(dir: &Path) -> Result<Manifest, CompareError> {
    let mut manifest = Manifest::new();
    scan_directory_into(dir, &mut manifest)?;
    Ok(manifest)
}

/// Scan `dir` and insert its files into `manifest`. Names already present are
/// replaced. `manifest` is untouched when an error is returned.
pub fn scan_directory_into(dir: &Path, manifest: &mut Manifest) -> Result<(), CompareError> {
    if !dir.exists() {
        return Err(CompareError::PathNotFound {
            path: dir.to_path_buf(),
        });
    }
    let root = std::path::absolute(dir).map_err(|e| io_err(dir, e))?;

    let mut dir_entries: Vec<_> = std::fs::read_dir(&root)
        .map_err(|e| io_err(&root, e))?
        .filter_map(|e| e.ok())
        .collect();
    dir_entries.sort_by_key(|e| e.file_name());

    let mut found = Vec::new();
    for dir_entry in dir_entries {
        let path = dir_entry.path();
        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("skipping {}: {e}", path.display());
                continue;
            }
        };
        if !metadata.is_file() {
            tracing::debug!("skipping non-file: {}", path.display());
            continue;
        }
        let name = dir_entry.file_name().to_string_lossy().into_owned();
        tracing::debug!("scanned: {name} ({} bytes)", metadata.len());
        found.push(ManifestEntry::new(name, metadata.len(), path));
    }

    if found.is_empty() {
        return Err(CompareError::EmptyDirectory { path: root });
    }

    tracing::info!("scanned {} files from {}", found.len(), root.display());
    manifest.extend(found);
    Ok(())
}

// ---------------------------------------------------------------------------
// 2. Parse
// ---------------------------------------------------------------------------

/// Load a manifest previously written by [`save`].
///
/// Returns `CompareError::PathNotFound` if `path` is absent and
/// `CompareError::MalformedManifest` (with 1-based line number) on the first
/// line that does not parse.
pub fn load(path: &Path) -> Result<Manifest, CompareError> {
    if !path.exists() {
        return Err(CompareError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read(path).map_err(|e| io_err(path, e))?;
    let manifest = parse_bytes(&contents, path)?;
    tracing::info!("loaded {} entries from {}", manifest.len(), path.display());
    Ok(manifest)
}

/// Parse manifest text. `origin` is only used in error messages.
///
/// Blank lines are ignored and both LF and CRLF terminators are accepted.
pub fn parse_str(contents: &str, origin: &Path) -> Result<Manifest, CompareError> {
    parse_bytes(contents.as_bytes(), origin)
}

/// Parse raw manifest bytes. Each line must be valid UTF-8.
pub fn parse_bytes(contents: &[u8], origin: &Path) -> Result<Manifest, CompareError> {
    let mut manifest = Manifest::new();
    for (i, raw) in contents.split(|b| *b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let malformed = |reason: String| CompareError::MalformedManifest {
            path: origin.to_path_buf(),
            line: i + 1,
            reason,
        };
        let line = std::str::from_utf8(raw).map_err(|_| malformed("invalid UTF-8".to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        manifest.insert(parse_line(line).map_err(malformed)?);
    }
    Ok(manifest)
}

fn parse_line(line: &str) -> Result<ManifestEntry, String> {
    let mut fields = line.splitn(3, FIELD_SEPARATOR);
    let (Some(name), Some(fingerprint), Some(path)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(format!("expected `name|fingerprint|path`, got {line:?}"));
    };
    if name.is_empty() {
        return Err("empty filename".to_string());
    }
    let not_integer = || format!("fingerprint {fingerprint:?} is not a non-negative integer");
    if fingerprint.is_empty() || !fingerprint.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_integer());
    }
    let fingerprint: u64 = fingerprint.parse().map_err(|_| not_integer())?;
    if path.is_empty() {
        return Err("empty path".to_string());
    }
    Ok(ManifestEntry::new(name, fingerprint, PathBuf::from(path)))
}

// ---------------------------------------------------------------------------
// 3. Save
// ---------------------------------------------------------------------------

/// Render `manifest` in file format, in insertion order.
pub fn render(manifest: &Manifest) -> String {
    writer::join_lines(manifest.iter().map(render_line))
}

fn render_line(entry: &ManifestEntry) -> String {
    format!(
        "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
        entry.name,
        entry.fingerprint,
        entry.path.to_string_lossy()
    )
}

/// Atomically write `manifest` to `path`, replacing any existing file.
///
/// Fails with `CompareError::MalformedManifest` before anything is written if
/// an entry could not be read back: a name containing `|`, or a name or path
/// containing a line break. `line` is the entry's would-be line number.
pub fn save(manifest: &Manifest, path: &Path) -> Result<(), CompareError> {
    for (i, entry) in manifest.iter().enumerate() {
        if let Some(reason) = unwritable_reason(entry) {
            return Err(CompareError::MalformedManifest {
                path: path.to_path_buf(),
                line: i + 1,
                reason,
            });
        }
    }
    writer::atomic_write(path, &render(manifest))
}

fn unwritable_reason(entry: &ManifestEntry) -> Option<String> {
    let is_break = |c: char| c == '\n' || c == '\r';
    if entry.name.contains(FIELD_SEPARATOR) {
        Some(format!("filename {:?} contains `{FIELD_SEPARATOR}`", entry.name))
    } else if entry.name.contains(is_break) {
        Some(format!("filename {:?} contains a line break", entry.name))
    } else if entry.path.to_string_lossy().contains(is_break) {
        Some(format!("path {:?} contains a line break", entry.path))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
