//! Error types for mirror-core

use std::path::PathBuf;

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-core operations
///
/// Only precondition and setup failures live here. Per-action copy and
/// remove failures are collected in [`crate::SyncReport`] instead, so that
/// one bad file never aborts the rest of a batch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input and/or output directory not supplied
    #[error("missing input and/or output directory")]
    MissingArgument,

    /// Input and output resolve to the identical directory
    #[error("the output directory cannot be the same as the input: {path}")]
    SameDirectory { path: PathBuf },

    /// The output root or a destination parent directory could not be created
    #[error("failed to create directory {path}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),
}
