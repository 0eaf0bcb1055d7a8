// src/selection.rs

//! Interactive selection of the project folder, archive name and branch.
//!
//! The three questions are asked in a fixed order. Only the project question is
//! repeated on a bad answer; an empty archive name or branch ends the run.

use crate::config::PresetAnswers;
use crate::constants::ARCHIVE_EXTENSION;
use crate::discovery::ProjectFolder;
use crate::errors::{Error, InputField, Result};
use crate::prompt::Prompt;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};

const PROJECT_QUESTION: &str = "Please enter the project name (e.g. equinox): ";
const ARCHIVE_QUESTION: &str =
    "Please enter the name for the extracted folder and zip file (e.g. test, client_cartridge): ";
const BRANCH_QUESTION: &str = "Please enter the name of the branch to clone: ";

/// Everything the operator chose for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorSelection {
    /// The project folder the archive goes into, if any.
    pub project_folder: Option<ProjectFolder>,
    /// Base name of the archive and of the extracted folder (trimmed, non-empty).
    pub archive_base_name: String,
    /// Branch to clone (trimmed, non-empty).
    pub branch_name: String,
}

impl OperatorSelection {
    /// File name of the archive, e.g. `demo.zip`.
    pub fn archive_file_name(&self) -> String {
        format!("{}.{}", self.archive_base_name, ARCHIVE_EXTENSION)
    }

    /// Where the archive is written: inside the selected project folder, or
    /// directly in `working_dir` when no project was selected.
    ///
    /// # Examples
    /// ```
    /// use repo_slice::discovery::ProjectFolder;
    /// use repo_slice::selection::OperatorSelection;
    /// use std::path::{Path, PathBuf};
    ///
    /// let mut selection = OperatorSelection {
    ///     project_folder: None,
    ///     archive_base_name: "demo".into(),
    ///     branch_name: "main".into(),
    /// };
    /// assert_eq!(selection.output_archive_path(Path::new("/work")), PathBuf::from("/work/demo.zip"));
    ///
    /// selection.project_folder = Some(ProjectFolder {
    ///     full_folder_name: "STG-2FA-equinox-foo".into(),
    ///     project_name: "equinox".into(),
    /// });
    /// assert_eq!(
    ///     selection.output_archive_path(Path::new("/work")),
    ///     PathBuf::from("/work/STG-2FA-equinox-foo/demo.zip")
    /// );
    /// ```
    pub fn output_archive_path(&self, working_dir: &Path) -> PathBuf {
        let dir = match &self.project_folder {
            Some(folder) => working_dir.join(&folder.full_folder_name),
            None => working_dir.to_path_buf(),
        };
        dir.join(self.archive_file_name())
    }
}

/// Asks the operator for the project, archive name and branch.
///
/// Answers present in `presets` are used as-is and their prompt is skipped;
/// they are validated the same way but never retried. `console` receives the
/// folder list, warnings and the resolved archive path.
///
/// # Errors
/// * `EmptyInput` for an empty archive name or branch.
/// * `NoMatchingProject` when a preset project does not exist.
/// * `Unexpected` when the input source fails or runs dry.
pub fn select(
    folders: &[ProjectFolder],
    presets: &PresetAnswers,
    working_dir: &Path,
    prompt: &mut dyn Prompt,
    console: &mut dyn Write,
) -> Result<OperatorSelection> {
    let project_folder = select_project(folders, presets.project.as_deref(), prompt, console)?;

    let archive_base_name = answer(
        InputField::ArchiveName,
        ARCHIVE_QUESTION,
        presets.archive_name.as_deref(),
        prompt,
    )?;

    let partial = OperatorSelection {
        project_folder,
        archive_base_name,
        branch_name: String::new(),
    };
    writeln!(
        console,
        "\nThe zip file will be saved to: {}",
        partial.output_archive_path(working_dir).display()
    )
    .context("Failed to write to the console")?;

    let branch_name = answer(
        InputField::BranchName,
        BRANCH_QUESTION,
        presets.branch.as_deref(),
        prompt,
    )?;

    Ok(OperatorSelection {
        branch_name,
        ..partial
    })
}

fn select_project(
    folders: &[ProjectFolder],
    preset: Option<&str>,
    prompt: &mut dyn Prompt,
    console: &mut dyn Write,
) -> Result<Option<ProjectFolder>> {
    if folders.is_empty() {
        log::warn!("No project folders found in the current directory.");
        writeln!(
            console,
            "\nWarning: no project folders were found in the current directory.\n\
             The zip file will be saved in the current directory."
        )
        .context("Failed to write to the console")?;
        if let Some(input) = preset {
            return Err(Error::NoMatchingProject {
                input: input.to_string(),
            });
        }
        return Ok(None);
    }

    if let Some(input) = preset {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::EmptyInput {
                field: InputField::ProjectName,
            });
        }
        return find_project(folders, input).cloned().map(Some).ok_or_else(|| {
            Error::NoMatchingProject {
                input: input.to_string(),
            }
        });
    }

    writeln!(console, "\nDetected project folders:").context("Failed to write to the console")?;
    for (index, folder) in folders.iter().enumerate() {
        writeln!(
            console,
            "  {}. {} ({})",
            index + 1,
            folder.project_name,
            folder.full_folder_name
        )
        .context("Failed to write to the console")?;
    }

    loop {
        let input = prompt.ask(PROJECT_QUESTION)?;
        let input = input.trim();
        if input.is_empty() {
            let err = Error::EmptyInput {
                field: InputField::ProjectName,
            };
            writeln!(console, "Error: {}", err).context("Failed to write to the console")?;
            continue;
        }
        match find_project(folders, input) {
            Some(folder) => {
                log::info!("Selected project folder '{}'", folder.full_folder_name);
                return Ok(Some(folder.clone()));
            }
            None => {
                let err = Error::NoMatchingProject {
                    input: input.to_string(),
                };
                writeln!(console, "\nError: {} Try again.", err)
                    .context("Failed to write to the console")?;
            }
        }
    }
}

fn find_project<'a>(folders: &'a [ProjectFolder], input: &str) -> Option<&'a ProjectFolder> {
    let wanted = input.to_lowercase();
    folders
        .iter()
        .find(|folder| folder.project_name.to_lowercase() == wanted)
}

fn answer(
    field: InputField,
    question: &str,
    preset: Option<&str>,
    prompt: &mut dyn Prompt,
) -> Result<String> {
    let raw = match preset {
        Some(value) => value.to_string(),
        None => prompt.ask(question)?,
    };
    let value = raw.trim();
    if value.is_empty() {
        return Err(Error::EmptyInput { field });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::LinePrompt;
    use std::io::Cursor;

    fn folders() -> Vec<ProjectFolder> {
        vec![
            ProjectFolder {
                full_folder_name: "STG-2FA-equinox-foo".into(),
                project_name: "equinox".into(),
            },
            ProjectFolder {
                full_folder_name: "STG-2FA-nova-bar".into(),
                project_name: "nova".into(),
            },
        ]
    }

    fn run_select(
        folders: &[ProjectFolder],
        presets: &PresetAnswers,
        script: &str,
    ) -> (Result<OperatorSelection>, String) {
        let mut prompt = LinePrompt::new(Cursor::new(script.to_string()), std::io::sink());
        let mut console = Vec::new();
        let result = select(
            folders,
            presets,
            Path::new("/work"),
            &mut prompt,
            &mut console,
        );
        (result, String::from_utf8(console).unwrap())
    }

    #[test]
    fn test_no_folders_skips_project_prompt() -> anyhow::Result<()> {
        let (result, console) = run_select(&[], &PresetAnswers::default(), "demo\nmain\n");
        let selection = result?;
        assert_eq!(selection.project_folder, None);
        assert_eq!(selection.archive_base_name, "demo");
        assert_eq!(selection.branch_name, "main");
        assert_eq!(
            selection.output_archive_path(Path::new("/work")),
            PathBuf::from("/work/demo.zip")
        );
        assert!(console.contains("Warning"));
        assert!(console.contains("/work/demo.zip"));
        Ok(())
    }

    #[test]
    fn test_project_prompt_retries_until_match() -> anyhow::Result<()> {
        let (result, console) = run_select(
            &folders(),
            &PresetAnswers::default(),
            "\nzeta\n  NOVA \n demo \n develop\n",
        );
        let selection = result?;
        assert_eq!(
            selection.project_folder.as_ref().map(|f| f.full_folder_name.as_str()),
            Some("STG-2FA-nova-bar")
        );
        assert_eq!(selection.archive_base_name, "demo");
        assert_eq!(selection.branch_name, "develop");
        assert!(console.contains("1. equinox (STG-2FA-equinox-foo)"));
        assert!(console.contains("2. nova (STG-2FA-nova-bar)"));
        assert!(console.contains("project name cannot be empty"));
        assert!(console.contains("'zeta' is not a valid project name"));
        assert!(console.contains("/work/STG-2FA-nova-bar/demo.zip"));
        Ok(())
    }

    #[test]
    fn test_empty_archive_name_is_terminal() {
        let (result, _) = run_select(&folders(), &PresetAnswers::default(), "equinox\n   \nmain\n");
        assert!(matches!(
            result,
            Err(Error::EmptyInput {
                field: InputField::ArchiveName
            })
        ));
    }

    #[test]
    fn test_empty_branch_is_terminal() {
        let (result, _) = run_select(&[], &PresetAnswers::default(), "demo\n\n");
        assert!(matches!(
            result,
            Err(Error::EmptyInput {
                field: InputField::BranchName
            })
        ));
    }

    #[test]
    fn test_presets_skip_prompts() -> anyhow::Result<()> {
        let presets = PresetAnswers {
            project: Some("Equinox".into()),
            archive_name: Some("demo".into()),
            branch: Some("main".into()),
        };
        let (result, console) = run_select(&folders(), &presets, "");
        let selection = result?;
        assert_eq!(
            selection.project_folder.map(|f| f.project_name),
            Some("equinox".to_string())
        );
        assert!(!console.contains("Detected project folders"));
        Ok(())
    }

    #[test]
    fn test_unknown_preset_project_is_not_retried() {
        let presets = PresetAnswers {
            project: Some("zeta".into()),
            ..PresetAnswers::default()
        };
        let (result, _) = run_select(&folders(), &presets, "equinox\ndemo\nmain\n");
        assert!(matches!(result, Err(Error::NoMatchingProject { ref input }) if input == "zeta"));

        let (result, _) = run_select(&[], &presets, "demo\nmain\n");
        assert!(matches!(result, Err(Error::NoMatchingProject { .. })));
    }

    #[test]
    fn test_input_running_dry_is_unexpected() {
        let (result, _) = run_select(&folders(), &PresetAnswers::default(), "zeta\n");
        assert!(matches!(result, Err(Error::Unexpected(_))));
    }
}
