use super::{
    path_resolve::resolve_against, validation::validate_settings, Config, PresetAnswers,
    ProviderCredentials,
};
use crate::cli::Cli;
use crate::constants::{DEFAULT_CLONE_DIR, DEFAULT_PROJECT_PREFIX, DEFAULT_TARGET_FOLDER};
use crate::errors::{Error, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// A builder for creating a `Config` programmatically.
///
/// Unset values fall back to the same defaults as the command line. The
/// working directory defaults to the process's current directory, captured
/// once when `build` is called.
///
/// # Examples
/// ```
/// use repo_slice::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .repo_url("https://github.com/acme/widgets.git")
///     .working_dir("/srv/projects")
///     .github_credentials(Some("bob"), Some("xyz"))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.target_folder, "cartridges");
/// assert_eq!(config.clone_dir, std::path::PathBuf::from("/srv/projects/temp_repo_clone"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    repo_url: Option<String>,
    target_folder: Option<String>,
    clone_dir: Option<String>,
    project_prefix: Option<String>,
    github: ProviderCredentials,
    bitbucket: ProviderCredentials,
    presets: PresetAnswers,
    working_dir: Option<PathBuf>,
    show_progress: Option<bool>,
}

impl ConfigBuilder {
    /// Creates a new `ConfigBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-filled from parsed command-line arguments.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            repo_url: cli.repo_url,
            target_folder: Some(cli.target_folder),
            clone_dir: Some(cli.clone_dir),
            project_prefix: Some(cli.project_prefix),
            github: ProviderCredentials {
                username: cli.github_username,
                secret: cli.github_pat,
            },
            bitbucket: ProviderCredentials {
                username: cli.bitbucket_username,
                secret: cli.bitbucket_app_password,
            },
            presets: PresetAnswers {
                project: cli.project,
                archive_name: cli.name,
                branch: cli.branch,
            },
            working_dir: None,
            show_progress: Some(!cli.no_progress),
        }
    }

    /// Sets the repository URL.
    pub fn repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = Some(url.into());
        self
    }

    /// Sets the folder inside the repository to extract.
    pub fn target_folder(mut self, folder: impl Into<String>) -> Self {
        self.target_folder = Some(folder.into());
        self
    }

    /// Sets the clone staging directory (relative paths resolve against the working directory).
    pub fn clone_dir(mut self, dir: impl Into<String>) -> Self {
        self.clone_dir = Some(dir.into());
        self
    }

    /// Sets the literal prefix of project folder names.
    pub fn project_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.project_prefix = Some(prefix.into());
        self
    }

    /// Sets the GitHub username and personal access token.
    pub fn github_credentials(mut self, username: Option<&str>, pat: Option<&str>) -> Self {
        self.github = ProviderCredentials {
            username: username.map(str::to_string),
            secret: pat.map(str::to_string),
        };
        self
    }

    /// Sets the Bitbucket username and app password.
    pub fn bitbucket_credentials(mut self, username: Option<&str>, password: Option<&str>) -> Self {
        self.bitbucket = ProviderCredentials {
            username: username.map(str::to_string),
            secret: password.map(str::to_string),
        };
        self
    }

    /// Pre-answers the project prompt.
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.presets.project = Some(project.into());
        self
    }

    /// Pre-answers the archive name prompt.
    pub fn archive_name(mut self, name: impl Into<String>) -> Self {
        self.presets.archive_name = Some(name.into());
        self
    }

    /// Pre-answers the branch prompt.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.presets.branch = Some(branch.into());
        self
    }

    /// Sets the directory the run operates in.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Enables or disables the clone spinner.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = Some(show);
        self
    }

    /// Validates the settings and builds the final `Config`.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if a required value is missing or the
    /// clone directory would wipe the working directory.
    pub fn build(self) -> Result<Config> {
        let working_dir = match self.working_dir {
            Some(dir) => dir,
            None => std::env::current_dir()
                .context("Failed to determine the current working directory")
                .map_err(Error::Unexpected)?,
        };

        let repo_url = self.repo_url.unwrap_or_default().trim().to_string();
        let target_folder = self
            .target_folder
            .unwrap_or_else(|| DEFAULT_TARGET_FOLDER.to_string());
        let project_prefix = self
            .project_prefix
            .unwrap_or_else(|| DEFAULT_PROJECT_PREFIX.to_string());
        let clone_dir_raw = self
            .clone_dir
            .unwrap_or_else(|| DEFAULT_CLONE_DIR.to_string());
        if clone_dir_raw.trim().is_empty() {
            return Err(Error::InvalidConfiguration(
                "the clone directory cannot be empty".to_string(),
            ));
        }
        let clone_dir = resolve_against(&working_dir, Path::new(clone_dir_raw.trim()));

        validate_settings(
            &repo_url,
            &target_folder,
            &project_prefix,
            &clone_dir,
            &working_dir,
        )?;

        let config = Config {
            repo_url,
            target_folder: target_folder.trim().to_string(),
            clone_dir,
            project_prefix,
            github: self.github,
            bitbucket: self.bitbucket,
            presets: self.presets,
            working_dir,
            show_progress: self.show_progress.unwrap_or(true),
        };
        log::debug!("Configuration built: {:?}", config);
        Ok(config)
    }
}
