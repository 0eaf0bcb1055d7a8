//! Defines the `Config` struct holding everything a run needs to know up front.
//!
//! The configuration is assembled once (from CLI arguments and environment
//! variables, see [`ConfigBuilder`]), validated, and then passed by reference
//! to the provider resolver, scanner, selector and pipeline. Nothing reads
//! process-wide state after that.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

pub use builder::ConfigBuilder;
mod builder;
pub(crate) mod path_resolve;
mod validation;

/// Username and secret configured for one provider. Either may be unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    /// Username or account identity.
    pub username: Option<String>,
    /// Personal access token or app password.
    pub secret: Option<String>,
}

// Custom Debug implementation so secrets never reach the logs.
impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("username", &self.username)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Answers supplied up front; the matching prompt is skipped when one is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetAnswers {
    /// Short project name (the part captured from the folder name).
    pub project: Option<String>,
    /// Base name of the archive and extracted folder.
    pub archive_name: Option<String>,
    /// Branch to clone.
    pub branch: Option<String>,
}

/// The complete, validated configuration of one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Repository URL exactly as configured.
    pub repo_url: String,
    /// Folder inside the repository that gets extracted.
    pub target_folder: String,
    /// Absolute path of the clone staging directory.
    pub clone_dir: PathBuf,
    /// Literal prefix of project folder names.
    pub project_prefix: String,
    /// Credentials used for GitHub repositories.
    pub github: ProviderCredentials,
    /// Credentials used for Bitbucket repositories.
    pub bitbucket: ProviderCredentials,
    /// Answers that skip their prompt.
    pub presets: PresetAnswers,
    /// Directory the run operates in (scanned for project folders, holds staging dirs).
    pub working_dir: PathBuf,
    /// Whether to animate a spinner while cloning.
    pub show_progress: bool,
}

impl Config {
    /// Directory names the project folder scanner must never report.
    pub fn excluded_folder_names(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        names.insert(crate::constants::DEPENDENCY_CACHE_DIR.to_string());
        if let Some(name) = self.clone_dir.file_name() {
            names.insert(name.to_string_lossy().into_owned());
        }
        names
    }
}
