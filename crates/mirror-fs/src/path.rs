//! Lexical path normalization and tree join keys

use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically: drop `.` components, fold `..` against the
/// preceding normal component, collapse redundant separators.
///
/// Never touches the filesystem, so it is safe to call on paths that do not
/// exist yet. Symlinks are not resolved; callers that need a resolved path
/// canonicalize at the I/O boundary instead.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`; a drive prefix likewise absorbs `..`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                // Relative paths may escape their base: keep the `..`
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// The path of `file` relative to `root`, used as the join key between the
/// input and output trees.
///
/// Returns `None` when `file` does not live under `root`; walked files
/// always do, so a `None` from a walk result indicates a caller bug.
pub fn relative_key(root: &Path, file: &Path) -> Option<PathBuf> {
    file.strip_prefix(root).ok().map(Path::to_path_buf)
}
