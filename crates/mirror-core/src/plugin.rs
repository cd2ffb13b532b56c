//! Plugin handle consumed by the host build pipeline

use std::path::{Path, PathBuf};

use crate::config::SyncOptions;
use crate::executor::{self, SyncReport};
use crate::plan::SyncPlan;
use crate::{Error, Result};

/// Handle returned by [`sync`] and held by the host build pipeline.
///
/// The host invokes [`AssetSync::on_write_complete`] at its "write
/// completed" lifecycle stage; each invocation runs exactly one
/// diff-and-execute cycle and resolves only when every scheduled action has
/// settled. Overlapping invocations are not serialized here; a host that
/// can run builds concurrently is responsible for sequencing them.
#[derive(Debug, Clone)]
pub struct AssetSync {
    input: PathBuf,
    output: PathBuf,
    verbose: bool,
}

/// Build an [`AssetSync`] handle from `options`.
///
/// The two precondition failures are raised here, synchronously, before any
/// filesystem access: [`Error::MissingArgument`] when either directory is
/// unset, and [`Error::SameDirectory`] when the two paths coincide after
/// lexical normalization.
pub fn sync(options: SyncOptions) -> Result<AssetSync> {
    let (Some(input), Some(output)) = (options.input, options.output) else {
        return Err(Error::MissingArgument);
    };
    let input = mirror_fs::normalize(&input);
    let output = mirror_fs::normalize(&output);
    if input == output {
        return Err(Error::SameDirectory { path: input });
    }
    Ok(AssetSync {
        input,
        output,
        verbose: options.verbose,
    })
}

impl AssetSync {
    /// Plugin name reported to the host pipeline.
    pub const NAME: &'static str = "asset-sync";

    /// Run one diff-and-execute cycle.
    ///
    /// A missing input root yields an empty successful report ("no assets
    /// configured" never breaks a build). Per-action copy/remove failures
    /// are enumerated in the returned [`SyncReport`], never raised as
    /// `Err`; only diffing and directory-creation failures are.
    pub async fn on_write_complete(&self) -> Result<SyncReport> {
        let Some(plan) = SyncPlan::build(&self.input, &self.output)? else {
            return Ok(SyncReport::empty());
        };
        Ok(executor::execute(plan, self.verbose).await)
    }

    /// Normalized input root.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Normalized output root.
    pub fn output(&self) -> &Path {
        &self.output
    }
}
