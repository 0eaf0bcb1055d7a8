//! Defines application-specific error types.
//!
//! This module provides the `Error` enum, which categorizes every failure a run
//! can end with, together with the process exit code and the operator hint
//! associated with each category.

use crate::command::CommandError;
use crate::git::Provider;
use std::fmt;
use thiserror::Error;

/// A specialized `Result` type for `repo-slice` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The three values the operator is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    ProjectName,
    ArchiveName,
    BranchName,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InputField::ProjectName => "project name",
            InputField::ArchiveName => "name for the extracted folder and zip file",
            InputField::BranchName => "branch name",
        };
        f.write_str(label)
    }
}

/// Application-specific errors used throughout `repo-slice`.
///
/// Configuration, provider and credential errors happen before any side effect.
/// Scan and input errors happen before any temporary directory exists. Clone,
/// copy and archive errors are only returned after the staging directories
/// have been cleaned up.
#[derive(Error, Debug)]
pub enum Error {
    // --- Configuration Errors ---
    /// A required setting is missing or unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The repository URL points at a host that is neither GitHub nor Bitbucket.
    #[error("Unsupported repository provider '{host}' in '{url}'. Only GitHub and Bitbucket URLs are supported.")]
    UnsupportedProvider {
        /// Host name found in the URL (empty if the URL has none).
        host: String,
        /// The configured URL.
        url: String,
    },

    /// The repository URL could not be parsed or lacks the owner/name segments.
    #[error("Invalid repository URL '{url}': {reason}. Expected: {expected}")]
    InvalidRepositoryUrl {
        /// The configured URL.
        url: String,
        /// What was wrong with it.
        reason: String,
        /// The shape the URL should have.
        expected: String,
    },

    /// The username or secret for the detected provider is not configured.
    #[error("Missing credentials for {provider}: {detail}")]
    MissingCredentials {
        /// Provider the credentials were looked up for.
        provider: Provider,
        /// Which values are missing and where they are read from.
        detail: String,
    },

    // --- Working Directory Errors ---
    /// The working directory could not be listed.
    #[error("Failed to read project folders in '{path}': {source}")]
    DirectoryScan {
        /// The directory that was being listed.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    // --- Operator Input Errors ---
    /// The operator left a required answer empty.
    #[error("The {field} cannot be empty.")]
    EmptyInput {
        /// The value that was left empty.
        field: InputField,
    },

    /// The given project name is not one of the detected project folders.
    #[error("'{input}' is not a valid project name from the list.")]
    NoMatchingProject {
        /// What the operator typed.
        input: String,
    },

    // --- Pipeline Errors ---
    /// The clone subprocess failed.
    #[error(transparent)]
    ExternalCommand(#[from] CommandError),

    /// The configured folder does not exist in the cloned repository.
    #[error("Folder '{folder}' was not found inside the cloned repository. Make sure the path is correct (it is case-sensitive).")]
    TargetFolderNotFound {
        /// The folder that was expected inside the clone.
        folder: String,
    },

    /// The extraction staging directory vanished before it could be archived.
    #[error("Could not create the archive because the source folder '{path}' does not exist.")]
    ArchiveSourceMissing {
        /// The staging directory that was expected.
        path: String,
    },

    /// Any failure the stages above do not anticipate.
    #[error("Unexpected error: {0:#}")]
    Unexpected(#[from] anyhow::Error),
}

impl Error {
    /// The process exit code associated with this error category.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Unexpected(_) => 1,
            Error::InvalidConfiguration(_) => 2,
            Error::UnsupportedProvider { .. } => 3,
            Error::InvalidRepositoryUrl { .. } => 4,
            Error::MissingCredentials { .. } => 5,
            Error::DirectoryScan { .. } => 6,
            Error::EmptyInput { .. } => 7,
            Error::NoMatchingProject { .. } => 8,
            Error::ExternalCommand(_) => 9,
            Error::TargetFolderNotFound { .. } => 10,
            Error::ArchiveSourceMissing { .. } => 11,
        }
    }

    /// A short hint listing the most likely root causes, if there is one.
    pub fn likely_causes(&self) -> Option<String> {
        match self {
            Error::ExternalCommand(_) => Some(
                "Possible reasons: the branch does not exist, the credentials are wrong, \
                 the repository is private or the URL is incorrect."
                    .to_string(),
            ),
            Error::InvalidRepositoryUrl { .. } | Error::UnsupportedProvider { .. } => Some(
                "Make sure the repository URL is a valid https GitHub or Bitbucket URL.".to_string(),
            ),
            Error::DirectoryScan { .. } => {
                Some("Make sure you have read permissions on the current directory.".to_string())
            }
            Error::Unexpected(_) => Some(
                "Check the output above and make sure your configuration and credentials are correct."
                    .to_string(),
            ),
            _ => None,
        }
    }

    /// Returns `true` for errors raised while the staging directories were in use.
    pub fn is_pipeline_error(&self) -> bool {
        matches!(
            self,
            Error::ExternalCommand(_)
                | Error::TargetFolderNotFound { .. }
                | Error::ArchiveSourceMissing { .. }
        )
    }
}
