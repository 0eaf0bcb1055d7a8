// src/config/validation.rs

use crate::discovery::ProjectPattern;
use crate::errors::{Error, Result};
use std::path::Path;

/// Rejects settings the run cannot work with.
///
/// `clone_dir` must already be resolved against `working_dir`.
pub(super) fn validate_settings(
    repo_url: &str,
    target_folder: &str,
    project_prefix: &str,
    clone_dir: &Path,
    working_dir: &Path,
) -> Result<()> {
    if repo_url.trim().is_empty() {
        return Err(Error::InvalidConfiguration(
            "the repository URL is not set (use --repo-url or REPO_URL)".to_string(),
        ));
    }
    if target_folder.trim().is_empty() {
        return Err(Error::InvalidConfiguration(
            "the folder to extract from the repository is not set".to_string(),
        ));
    }
    if project_prefix.is_empty() {
        return Err(Error::InvalidConfiguration(
            "the project folder prefix cannot be empty".to_string(),
        ));
    }
    ProjectPattern::new(project_prefix)?;
    // The clone directory is deleted at the start and end of every run.
    if clone_dir.as_os_str().is_empty() || working_dir.starts_with(clone_dir) {
        return Err(Error::InvalidConfiguration(format!(
            "the clone directory '{}' must not be the working directory or one of its parents",
            clone_dir.display()
        )));
    }
    Ok(())
}
