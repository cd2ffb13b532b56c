//! Sync configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Options for one sync plugin instance.
///
/// Constructed once at the call site and never mutated afterwards; the
/// handle returned by [`crate::sync`] keeps its own resolved copy, so a
/// caller-held `SyncOptions` is never written back to.
///
/// Defaults: `input` and `output` are unset (and required — [`crate::sync`]
/// rejects an options value missing either), `verbose` is `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Source asset directory, e.g. `src/assets`
    pub input: Option<PathBuf>,
    /// Destination directory, e.g. `dist/assets`
    pub output: Option<PathBuf>,
    /// Announce each copy/overwrite/unlink at info level
    #[serde(default)]
    pub verbose: bool,
}

impl SyncOptions {
    /// Options with both directories set and `verbose` off.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: Some(input.into()),
            output: Some(output.into()),
            verbose: false,
        }
    }

    /// Enable or disable per-action reporting.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
