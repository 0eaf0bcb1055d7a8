//! Recursive directory copy.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Copies the tree rooted at `source` into `destination`, preserving structure.
///
/// `destination` is created if needed. Symlinks are recreated as links on
/// Unix and skipped elsewhere. Returns the number of files copied.
pub(crate) fn copy_dir_recursive(source: &Path, destination: &Path) -> Result<u64> {
    let mut copied = 0;
    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.with_context(|| format!("Failed to walk '{}'", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .context("Walked entry outside of the source directory")?;
        let target = destination.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory '{}'", target.display()))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy '{}' to '{}'",
                    entry.path().display(),
                    target.display()
                )
            })?;
            copied += 1;
        }
    }
    log::debug!(
        "Copied {} files from {} to {}",
        copied,
        source.display(),
        destination.display()
    );
    Ok(copied)
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let points_to =
        fs::read_link(link).with_context(|| format!("Failed to read link '{}'", link.display()))?;
    std::os::unix::fs::symlink(&points_to, target)
        .with_context(|| format!("Failed to create link '{}'", target.display()))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, _target: &Path) -> Result<()> {
    log::warn!("Skipping symbolic link '{}'", link.display());
    Ok(())
}
