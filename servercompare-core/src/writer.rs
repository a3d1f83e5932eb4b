//! Atomic line writer shared by manifest saves and diff output.
//!
//! Every write goes to `<path>.servercompare.tmp` in the same directory and is
//! then renamed over the final path, so readers never observe a half-written
//! list. Missing parent directories are created first.

use std::path::{Path, PathBuf};

use crate::error::{io_err, CompareError};

/// Line terminator for every file this crate writes.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Sibling temp path used while writing `path`.
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".servercompare.tmp");
    PathBuf::from(tmp)
}

/// Join `lines` with [`LINE_ENDING`], terminating every line (including the
/// last). No lines produces an empty string.
pub fn join_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push_str(LINE_ENDING);
    }
    out
}

/// Atomically replace `path` with `lines`, one per line.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<(), CompareError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    atomic_write(path, &join_lines(lines))
}

/// Atomically replace `path` with `content`. Existing files are overwritten
/// without confirmation.
pub(crate) fn atomic_write(path: &Path, content: &str) -> Result<(), CompareError> {
    atomic_write_with_tmp(path, content, &tmp_path_for(path))
}

fn atomic_write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<(), CompareError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn join_lines_terminates_every_line() {
        assert_eq!(join_lines(["a", "b"]), format!("a{LINE_ENDING}b{LINE_ENDING}"));
    }

    #[test]
    fn join_lines_empty_is_empty_string() {
        assert_eq!(join_lines(Vec::<String>::new()), "");
    }

    #[test]
    fn write_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("output").join("nested").join("list.txt");
        write_lines(&path, ["/x/1.txt"]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("/x/1.txt{LINE_ENDING}")
        );
    }

    #[test]
    fn write_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("list.txt");
        fs::write(&path, "old contents that are longer\n").unwrap();
        write_lines(&path, ["new"]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), format!("new{LINE_ENDING}"));
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.txt");
        write_lines(&path, ["data"]).unwrap();
        assert!(!tmp_path_for(&path).exists(), ".servercompare.tmp must be cleaned up");
    }

    #[test]
    fn tmp_path_is_a_sibling_with_suffix() {
        let path = Path::new("/out/list.txt");
        assert_eq!(tmp_path_for(path), PathBuf::from("/out/list.txt.servercompare.tmp"));
    }

    #[test]
    #[cfg(unix)]
    fn tmp_path_keeps_non_utf8_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/out/list\xff.txt"));
        let tmp = tmp_path_for(path);
        assert_eq!(
            tmp.as_os_str().as_bytes(),
            b"/out/list\xff.txt.servercompare.tmp"
        );
    }

    #[test]
    fn rename_failure_cleans_tmp_and_reports_io() {
        let root = TempDir::new().unwrap();
        // Renaming a file over a non-empty directory fails on every platform.
        let path = root.path().join("occupied");
        fs::create_dir_all(path.join("child")).unwrap();
        let tmp_path = root.path().join("occupied.servercompare.tmp");

        let err = atomic_write_with_tmp(&path, "content", &tmp_path)
            .expect_err("rename over a directory should fail");
        assert!(matches!(err, CompareError::Io { .. }), "got: {err}");
        assert!(!tmp_path.exists(), ".servercompare.tmp should be cleaned up");
        assert!(path.join("child").is_dir(), "existing directory must be intact");
    }
}
