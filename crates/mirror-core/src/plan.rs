//! Diff engine: joins the two trees and emits the action sets

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::{Error, Result};

/// One file copy scheduled by the diff engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyAction {
    /// Absolute path under the input root
    pub source: PathBuf,
    /// Absolute path under the output root at the same relative key
    pub dest: PathBuf,
    /// True when the destination already exists with a differing mtime
    pub overwrite: bool,
}

/// The action sets computed by one diff pass.
///
/// Copies and removals are unordered, both within and across the two sets;
/// the executor may run everything concurrently. Diffing completes fully
/// before anything executes, so no action is derived from a partially
/// observed tree.
#[derive(Debug, Default)]
pub struct SyncPlan {
    pub copies: Vec<CopyAction>,
    pub removals: Vec<PathBuf>,
}

/// A tree indexed by relative key: `key -> (absolute path, mtime)`.
type TreeIndex = HashMap<PathBuf, (PathBuf, SystemTime)>;

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.copies.is_empty() && self.removals.is_empty()
    }

    /// Diff `input_root` against `output_root`.
    ///
    /// Returns `Ok(None)` when the input root does not exist — a build with
    /// no assets directory is a silent no-op, not an error. The output root
    /// is created if missing, as are destination parent directories for new
    /// files (eagerly, here: the executor's copy operation does not create
    /// parents). Failure to create either is [`Error::CreateDirFailed`].
    pub fn build(input_root: &Path, output_root: &Path) -> Result<Option<Self>> {
        if !input_root.exists() {
            tracing::debug!(input = %input_root.display(), "input root missing, nothing to sync");
            return Ok(None);
        }
        let input_root =
            dunce::canonicalize(input_root).map_err(|e| mirror_fs::Error::io(input_root, e))?;

        fs::create_dir_all(output_root).map_err(|e| Error::CreateDirFailed {
            path: output_root.to_path_buf(),
            source: e,
        })?;
        let output_root =
            dunce::canonicalize(output_root).map_err(|e| mirror_fs::Error::io(output_root, e))?;

        // Symlinked aliases of the same directory survive the lexical
        // precondition check in `sync()`; catch them after resolution.
        if input_root == output_root {
            return Err(Error::SameDirectory { path: input_root });
        }

        let input_index = index_tree(&input_root)?;
        let output_index = index_tree(&output_root)?;

        let mut plan = Self::default();

        for (key, (source, source_mtime)) in &input_index {
            match output_index.get(key) {
                None => {
                    let dest = output_root.join(key);
                    if let Some(parent) = dest.parent() {
                        fs::create_dir_all(parent).map_err(|e| Error::CreateDirFailed {
                            path: parent.to_path_buf(),
                            source: e,
                        })?;
                    }
                    tracing::debug!(file = %dest.display(), "scheduling copy");
                    plan.copies.push(CopyAction {
                        source: source.clone(),
                        dest,
                        overwrite: false,
                    });
                }
                // SystemTime comparison is exact value equality (total
                // order, no sentinel values): unequal in either direction
                // means stale, equal means skip.
                Some((dest, dest_mtime)) if dest_mtime != source_mtime => {
                    tracing::debug!(file = %dest.display(), "scheduling overwrite");
                    plan.copies.push(CopyAction {
                        source: source.clone(),
                        dest: dest.clone(),
                        overwrite: true,
                    });
                }
                Some(_) => {}
            }
        }

        for (key, (orphan, _)) in &output_index {
            if !input_index.contains_key(key) {
                tracing::debug!(file = %orphan.display(), "scheduling unlink");
                plan.removals.push(orphan.clone());
            }
        }

        Ok(Some(plan))
    }
}

fn index_tree(root: &Path) -> Result<TreeIndex> {
    let mut index = TreeIndex::new();
    for file in mirror_fs::walk(root)? {
        // Walked files always live under their root.
        let Some(key) = mirror_fs::relative_key(root, &file) else {
            continue;
        };
        let mtime = fs::metadata(&file)
            .and_then(|m| m.modified())
            .map_err(|e| mirror_fs::Error::io(&file, e))?;
        index.insert(key, (file, mtime));
    }
    Ok(index)
}
