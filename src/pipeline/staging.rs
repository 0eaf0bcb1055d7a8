//! Ownership of the two temporary directories used by a run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A temporary directory that could not be removed. Never fatal.
#[derive(Error, Debug)]
#[error("Failed to remove temporary directory '{path}': {source}")]
pub struct CleanupWarning {
    /// The directory that is left behind.
    pub path: PathBuf,
    /// The underlying `std::io::Error`.
    #[source]
    pub source: io::Error,
}

/// The clone and extraction staging directories of one run.
///
/// Both directories are registered before any stage runs. [`release`] removes
/// whichever of them exists; it does its work once, and dropping an unreleased
/// area releases it, so the directories go away even when a stage panics.
///
/// [`release`]: StagingArea::release
#[derive(Debug)]
pub struct StagingArea {
    clone_dir: PathBuf,
    extract_dir: PathBuf,
    released: bool,
}

impl StagingArea {
    pub fn acquire(clone_dir: impl Into<PathBuf>, extract_dir: impl Into<PathBuf>) -> Self {
        Self {
            clone_dir: clone_dir.into(),
            extract_dir: extract_dir.into(),
            released: false,
        }
    }

    pub fn clone_dir(&self) -> &Path {
        &self.clone_dir
    }

    pub fn extract_dir(&self) -> &Path {
        &self.extract_dir
    }

    /// Empties the clone directory, creating it if needed.
    pub fn reset_clone_dir(&self) -> io::Result<()> {
        remove_if_exists(&self.clone_dir)?;
        fs::create_dir_all(&self.clone_dir)
    }

    /// Removes both directories if they exist.
    ///
    /// Failures are collected as warnings instead of being returned as errors.
    /// Calls after the first do nothing and return an empty report.
    pub fn release(&mut self) -> CleanupReport {
        let mut report = CleanupReport::default();
        if self.released {
            return report;
        }
        self.released = true;

        for dir in [&self.clone_dir, &self.extract_dir] {
            if !dir.exists() {
                continue;
            }
            match remove_if_exists(dir) {
                Ok(()) => report.removed.push(dir.clone()),
                Err(source) => report.warnings.push(CleanupWarning {
                    path: dir.clone(),
                    source,
                }),
            }
        }
        report
    }
}

/// What [`StagingArea::release`] did.
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Directories that were removed.
    pub removed: Vec<PathBuf>,
    /// Directories that could not be removed.
    pub warnings: Vec<CleanupWarning>,
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        let report = self.release();
        for dir in &report.removed {
            log::debug!("Removed temporary directory {}", dir.display());
        }
        for warning in &report.warnings {
            log::warn!("{}", warning);
        }
    }
}

fn remove_if_exists(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
