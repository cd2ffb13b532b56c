//! Concurrent executor for a computed sync plan

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::plan::{CopyAction, SyncPlan};

/// Aggregate outcome of one executed sync cycle.
///
/// Every settled action is recorded; failures land in `errors` and clear
/// `success` but are never surfaced as `Err` and never cancel siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether every action settled without error
    pub success: bool,
    /// Actions performed, e.g. `"copy: dist/assets/logo.png"`
    pub actions: Vec<String>,
    /// Errors encountered, one entry per failed action
    pub errors: Vec<String>,
}

impl SyncReport {
    /// Report for a cycle that had nothing to do.
    pub fn empty() -> Self {
        Self {
            success: true,
            actions: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Execute every action in `plan` concurrently and wait for all of them.
///
/// Copies and removals are spawned together with no ordering between
/// actions or between the two kinds. The join is "wait for all, collect
/// outcomes": a failed or panicked task is recorded and its siblings run
/// to completion regardless. Returns only once every action has settled.
pub async fn execute(plan: SyncPlan, verbose: bool) -> SyncReport {
    let mut report = SyncReport::empty();
    let mut tasks: JoinSet<Result<String, String>> = JoinSet::new();

    for copy in plan.copies {
        if verbose {
            let label = if copy.overwrite { "overwrite" } else { "copy" };
            tracing::info!("{}: {}", label, copy.source.display());
        }
        tasks.spawn(run_copy(copy));
    }
    for path in plan.removals {
        if verbose {
            tracing::info!("unlink: {}", path.display());
        }
        tasks.spawn(run_remove(path));
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(action)) => report.actions.push(action),
            Ok(Err(error)) => {
                tracing::warn!(%error, "sync action failed");
                report.errors.push(error);
            }
            Err(join_error) => {
                tracing::warn!(%join_error, "sync task aborted");
                report.errors.push(join_error.to_string());
            }
        }
    }

    report.success = report.errors.is_empty();
    report
}

async fn run_copy(copy: CopyAction) -> Result<String, String> {
    let label = if copy.overwrite { "overwrite" } else { "copy" };
    copy_file(&copy.source, &copy.dest)
        .await
        .map(|_| format!("{}: {}", label, copy.dest.display()))
        .map_err(|e| format!("could not {} {}: {}", label, copy.dest.display(), e))
}

async fn run_remove(path: PathBuf) -> Result<String, String> {
    tokio::fs::remove_file(&path)
        .await
        .map(|_| format!("unlink: {}", path.display()))
        .map_err(|e| format!("could not unlink {}: {}", path.display(), e))
}

/// Copy `source` over `dest` (replacing it if present), then stamp `dest`
/// with `source`'s mtime. The mtime is the staleness signal: without the
/// stamp the fresh copy would compare unequal on the next run and every
/// sync would re-copy the whole tree.
async fn copy_file(source: &Path, dest: &Path) -> std::io::Result<()> {
    tokio::fs::copy(source, dest).await?;
    let mtime = tokio::fs::metadata(source).await?.modified()?;
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || {
        std::fs::OpenOptions::new()
            .write(true)
            .open(&dest)?
            .set_modified(mtime)
    })
    .await
    .map_err(std::io::Error::other)?
}
