// src/config/path_resolve.rs

use std::path::{Component, Path, PathBuf};

/// Resolves `path` against `base` without touching the filesystem.
///
/// `.` components are dropped and `..` pops the previous component, so the
/// result can be compared with other paths even if it does not exist yet.
pub(crate) fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}
