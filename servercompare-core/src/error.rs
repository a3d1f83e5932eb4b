//! Error types for servercompare-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Role;

/// All errors that can arise from manifest and comparison operations.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The directory to scan or the manifest file to parse does not exist.
    #[error("path not found: {path}")]
    PathNotFound { path: PathBuf },

    /// A directory scan found no regular files.
    #[error("no files found in directory {path}")]
    EmptyDirectory { path: PathBuf },

    /// A manifest line does not match `name|fingerprint|path`.
    #[error("malformed manifest {path} at line {line}: {reason}")]
    MalformedManifest {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The operation needs a populated manifest for `role`.
    #[error("{role} manifest is not populated")]
    NotPopulated { role: Role },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`CompareError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CompareError {
    CompareError::Io {
        path: path.into(),
        source,
    }
}
