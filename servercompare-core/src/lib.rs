//! # servercompare-core
//!
//! Size-fingerprint manifests of two directories and a three-way diff
//! between them.
//!
//! - [`types`]: [`Manifest`], [`ManifestEntry`], [`Role`]
//! - [`manifest`]: directory scan and the `name|fingerprint|path` file format
//! - [`comparer`]: [`ManifestComparer`] and [`comparer::diff`]
//! - [`output`]: [`DiffReport`] and [`OutputLayout`]
//! - [`writer`]: atomic line-file writes
//! - [`error`]: [`CompareError`]

pub mod comparer;
pub mod error;
pub mod manifest;
pub mod output;
pub mod types;
pub mod writer;

pub use comparer::ManifestComparer;
pub use error::CompareError;
pub use output::{DiffReport, OutputLayout};
pub use types::{Fingerprint, Manifest, ManifestEntry, Role};
