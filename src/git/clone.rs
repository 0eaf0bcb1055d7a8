// src/git/clone.rs
//! Shallow-clones a single branch with the `git` command-line client.

use crate::command::{CommandError, CommandRunner};
use crate::constants::GIT_PROGRAM;
use crate::progress::LoadingIndicator;
use std::path::Path;

/// Arguments for `git clone --depth 1 --branch <branch> <url> <dir>`.
pub fn shallow_clone_args(url: &str, branch: &str, destination: &Path) -> Vec<String> {
    vec![
        "clone".to_string(),
        "--depth".to_string(),
        "1".to_string(),
        "--branch".to_string(),
        branch.to_string(),
        url.to_string(),
        destination.display().to_string(),
    ]
}

/// Clones `branch` of `authenticated_url` into `destination`.
///
/// The indicator runs for exactly the duration of the subprocess and is
/// stopped before this function returns, whatever the outcome. Errors come
/// back with credentials masked.
pub fn shallow_clone(
    runner: &dyn CommandRunner,
    indicator: &dyn LoadingIndicator,
    authenticated_url: &str,
    branch: &str,
    destination: &Path,
) -> Result<(), CommandError> {
    let args = shallow_clone_args(authenticated_url, branch, destination);

    indicator.start("Cloning repository. Please wait");
    let result = runner.run(GIT_PROGRAM, &args);
    indicator.stop();

    match result {
        Ok(_) => {
            log::info!("Cloned branch '{}' into {}", branch, destination.display());
            Ok(())
        }
        Err(e) => {
            let e = e.redacted();
            log::debug!("git clone failed: {}", e);
            Err(e)
        }
    }
}
