//! Recursive tree enumeration

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Enumerate every regular file reachable from `root` as a flat list of
/// absolute paths. Order is unspecified; callers treat the result as a set.
///
/// A `root` that is itself a file yields a single-element result. A missing
/// `root` fails with a not-found I/O error (see [`Error::is_not_found`]);
/// callers that want "absent root means nothing to do" check existence
/// before walking.
pub fn walk(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect(root, &mut files)?;
    Ok(files)
}

fn collect(path: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
    if metadata.is_dir() {
        tracing::trace!(dir = %path.display(), "walking directory");
        for entry in fs::read_dir(path).map_err(|e| Error::io(path, e))? {
            let entry = entry.map_err(|e| Error::io(path, e))?;
            collect(&entry.path(), files)?;
        }
    } else {
        files.push(path.to_path_buf());
    }
    Ok(())
}
