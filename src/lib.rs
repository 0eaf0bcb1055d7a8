//! `repo-slice` is a library and command-line tool that extracts one folder of a
//! remote GitHub or Bitbucket repository into a zip archive.
//!
//! A run goes through four phases:
//! 1.  **Resolve**: Classify the repository URL and pick the provider's credentials.
//! 2.  **Discover**: Find the sibling project folders in the working directory.
//! 3.  **Select**: Ask the operator for the project, archive name and branch.
//! 4.  **Extract**: Shallow-clone the branch, copy the folder, zip it, clean up.
//!
//! The operator-facing pieces (prompt, clone runner, spinner, console) are
//! passed in as trait objects, so the whole run can be driven from a test
//! without a terminal or network access.
//!
//! # Example: Library Usage
//!
//! ```
//! use repo_slice::{discover, ConfigBuilder};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().unwrap();
//! fs::create_dir(temp_dir.path().join("STG-2FA-equinox-storefront")).unwrap();
//! fs::create_dir(temp_dir.path().join("node_modules")).unwrap();
//!
//! let config = ConfigBuilder::new()
//!     .repo_url("https://github.com/acme/widgets.git")
//!     .working_dir(temp_dir.path())
//!     .build()
//!     .unwrap();
//!
//! let folders = discover(&config).unwrap();
//! assert_eq!(folders.len(), 1);
//! assert_eq!(folders[0].project_name, "equinox");
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod errors;
pub mod git;
pub mod pipeline;
pub mod progress;
pub mod prompt;
pub mod selection;

// Re-export key public types for easier use as a library
pub use config::{Config, ConfigBuilder};
pub use errors::{Error, Result};

use crate::command::CommandRunner;
use crate::constants::EXTRACTED_TEMP_SUFFIX;
use crate::discovery::{scan_project_folders, ProjectFolder, ProjectPattern};
use crate::git::{Provider, ResolvedRepository, UsernameSource};
use crate::pipeline::{run_pipeline, CleanupWarning, ExtractionPlan};
use crate::progress::LoadingIndicator;
use crate::prompt::Prompt;
use crate::selection::OperatorSelection;
use anyhow::Context;
use std::io::Write;
use std::path::PathBuf;

/// Summary of a successful run.
#[derive(Debug)]
pub struct RunReport {
    /// The repository that was cloned.
    pub repository: ResolvedRepository,
    /// What the operator chose.
    pub selection: OperatorSelection,
    /// The archive that was written.
    pub archive_path: PathBuf,
    /// Staging directories that could not be removed.
    pub cleanup_warnings: Vec<CleanupWarning>,
}

/// Classifies the configured repository and selects its credentials.
///
/// Nothing is touched on disk; a failure here means the run never started.
pub fn resolve(config: &Config) -> Result<ResolvedRepository> {
    git::resolve_repository(config)
}

/// Lists the project folders in the configured working directory.
pub fn discover(config: &Config) -> Result<Vec<ProjectFolder>> {
    let pattern = ProjectPattern::new(&config.project_prefix)?;
    scan_project_folders(
        &config.working_dir,
        &config.excluded_folder_names(),
        &pattern,
    )
}

/// Executes a complete run: resolve, discover, select and extract.
///
/// # Arguments
/// * `config` - The configuration for the entire run.
/// * `prompt` - Where the operator's answers come from.
/// * `runner` - Runs the `git` subprocess.
/// * `indicator` - Animated while the clone is running.
/// * `console` - Receives the operator-facing progress lines.
///
/// # Errors
/// Configuration, credential, scan and input errors are returned before any
/// temporary directory is created. Clone, copy and archive errors are
/// returned after both staging directories have been removed.
pub fn run(
    config: &Config,
    prompt: &mut dyn Prompt,
    runner: &dyn CommandRunner,
    indicator: &dyn LoadingIndicator,
    console: &mut dyn Write,
) -> Result<RunReport> {
    let repository = resolve(config)?;
    describe_repository(&repository, console)?;

    let folders = discover(config)?;
    log::debug!("Detected {} project folders", folders.len());

    let selection = selection::select(
        &folders,
        &config.presets,
        &config.working_dir,
        prompt,
        console,
    )?;

    let extract_dir = config.working_dir.join(format!(
        "{}{}",
        selection.archive_base_name, EXTRACTED_TEMP_SUFFIX
    ));
    // Each staging directory is wiped independently, so neither may contain the other.
    if extract_dir.starts_with(&config.clone_dir) || config.clone_dir.starts_with(&extract_dir) {
        return Err(Error::InvalidConfiguration(format!(
            "the clone directory '{}' overlaps the extraction directory '{}'; choose another name",
            config.clone_dir.display(),
            extract_dir.display()
        )));
    }

    let plan = ExtractionPlan {
        repository,
        branch: selection.branch_name.clone(),
        target_folder: config.target_folder.clone(),
        clone_dir: config.clone_dir.clone(),
        extract_dir,
        archive_base_name: selection.archive_base_name.clone(),
        archive_path: selection.output_archive_path(&config.working_dir),
    };

    let report = run_pipeline(&plan, runner, indicator, console)?;
    log::info!("Archive written to {}", report.archive_path.display());

    Ok(RunReport {
        repository: plan.repository,
        selection,
        archive_path: report.archive_path,
        cleanup_warnings: report.cleanup_warnings,
    })
}

fn describe_repository(repository: &ResolvedRepository, console: &mut dyn Write) -> Result<()> {
    let target = &repository.target;
    if target.provider == Provider::Bitbucket {
        let origin = match repository.username_source {
            UsernameSource::Url => "detected in the URL",
            UsernameSource::Configuration => "taken from the configuration",
        };
        writeln!(
            console,
            "\nBitbucket username {}: {}",
            origin, repository.credentials.username
        )
        .context("Failed to write to the console")?;
    }
    writeln!(
        console,
        "\nRepository information detected:\n  Provider: {}\n  Owner: {}\n  Name: {}",
        target.provider, target.owner, target.name
    )
    .context("Failed to write to the console")?;
    Ok(())
}
