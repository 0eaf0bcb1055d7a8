// src/discovery.rs

//! Finds sibling project folders in the working directory.
//!
//! A project folder is a directory whose name contains the configured prefix
//! followed by a project name and a `-` delimiter, e.g. `STG-2FA-equinox-site`
//! for the project `equinox`.

use crate::errors::{Error, Result};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A directory in the working directory that belongs to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFolder {
    /// The directory name as listed.
    pub full_folder_name: String,
    /// The project name captured from the directory name.
    pub project_name: String,
}

/// Matches folder names of the form `<prefix><project>-...`.
#[derive(Debug, Clone)]
pub struct ProjectPattern {
    regex: Regex,
}

impl ProjectPattern {
    /// Builds the pattern for a literal prefix such as `STG-2FA-`.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the prefix is too large to compile.
    pub fn new(prefix: &str) -> Result<Self> {
        let regex = Regex::new(&format!("{}(.*?)-", regex::escape(prefix))).map_err(|e| {
            Error::InvalidConfiguration(format!("unusable project folder prefix: {}", e))
        })?;
        Ok(Self { regex })
    }

    /// Returns the captured project name, or `None` if the name does not match.
    ///
    /// # Examples
    /// ```
    /// use repo_slice::discovery::ProjectPattern;
    ///
    /// let pattern = ProjectPattern::new("STG-2FA-").unwrap();
    /// assert_eq!(pattern.project_name("STG-2FA-equinox-foo"), Some("equinox"));
    /// assert_eq!(pattern.project_name("STG-2FA-equinox"), None);
    /// assert_eq!(pattern.project_name("other"), None);
    /// ```
    pub fn project_name<'a>(&self, folder_name: &'a str) -> Option<&'a str> {
        self.regex
            .captures(folder_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|name| !name.is_empty())
    }
}

/// Lists the project folders directly inside `dir`.
///
/// Only directories are considered, names in `excluded` are skipped, and the
/// result keeps the order in which the directory listing returned the entries.
///
/// # Errors
/// Returns `DirectoryScan` if `dir` or one of its entries cannot be read.
pub fn scan_project_folders(
    dir: &Path,
    excluded: &HashSet<String>,
    pattern: &ProjectPattern,
) -> Result<Vec<ProjectFolder>> {
    let scan_error = |source: std::io::Error| Error::DirectoryScan {
        path: dir.display().to_string(),
        source,
    };

    let mut folders = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_error)? {
        let entry = entry.map_err(scan_error)?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::debug!("Skipping non UTF-8 entry: {:?}", entry.file_name());
            continue;
        };
        // Follows symlinks, like a plain stat would.
        if !entry.path().is_dir() || excluded.contains(&name) {
            continue;
        }
        if let Some(project_name) = pattern.project_name(&name) {
            log::debug!("Found project folder '{}' ({})", name, project_name);
            folders.push(ProjectFolder {
                project_name: project_name.to_string(),
                full_folder_name: name,
            });
        }
    }
    Ok(folders)
}
