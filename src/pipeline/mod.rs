// src/pipeline/mod.rs
//! The extraction pipeline: clean, clone, copy, archive, and always clean up.
//!
//! Both staging directories are registered in a [`StagingArea`] before the
//! first stage runs. Whatever stage fails, the area is released exactly once
//! before the error is handed back, and cleanup problems are only reported as
//! warnings next to the original outcome.

use crate::command::CommandRunner;
use crate::errors::{Error, Result};
use crate::git::{shallow_clone, ResolvedRepository};
use crate::progress::LoadingIndicator;
use anyhow::Context;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

mod archive;
mod copy;
mod staging;

pub use staging::{CleanupReport, CleanupWarning, StagingArea};

const CONSOLE: &str = "Failed to write to the console";

/// The stages a run goes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Clean,
    Clone,
    Copy,
    Archive,
    Cleanup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::Clean => "clean",
            Stage::Clone => "clone",
            Stage::Copy => "copy",
            Stage::Archive => "archive",
            Stage::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// Everything the pipeline needs, fixed before it starts.
#[derive(Debug, Clone)]
pub struct ExtractionPlan {
    /// Repository and the credentials used to clone it.
    pub repository: ResolvedRepository,
    /// Branch to clone.
    pub branch: String,
    /// Folder inside the repository to extract.
    pub target_folder: String,
    /// Clone staging directory.
    pub clone_dir: PathBuf,
    /// Extraction staging directory.
    pub extract_dir: PathBuf,
    /// Root entry name inside the archive.
    pub archive_base_name: String,
    /// Where the archive is written.
    pub archive_path: PathBuf,
}

/// Outcome of a successful pipeline run.
#[derive(Debug)]
pub struct PipelineReport {
    pub archive_path: PathBuf,
    /// Number of regular files in the archive.
    pub files_archived: u64,
    /// Staging directories that could not be removed.
    pub cleanup_warnings: Vec<CleanupWarning>,
}

/// Runs all stages of `plan`, writing progress lines to `console`.
///
/// # Errors
/// Returns the error of the first failing stage, after cleanup has run.
pub fn run_pipeline(
    plan: &ExtractionPlan,
    runner: &dyn CommandRunner,
    indicator: &dyn LoadingIndicator,
    console: &mut dyn Write,
) -> Result<PipelineReport> {
    let mut staging = StagingArea::acquire(&plan.clone_dir, &plan.extract_dir);
    let mut stage = Stage::Init;

    let outcome = run_stages(plan, &staging, runner, indicator, console, &mut stage);
    if let Err(e) = &outcome {
        log::error!("Pipeline failed during the {} stage: {}", stage, e);
    }

    let report = {
        let _span = tracing::info_span!("stage", name = %Stage::Cleanup).entered();
        let report = staging.release();
        // Console failures here must not replace the outcome of the run.
        if let Err(e) = report_cleanup(&report, console) {
            log::warn!("{:#}", e);
        }
        report
    };

    let files_archived = outcome?;
    writeln!(console, "\n--- Process completed successfully ---").context(CONSOLE)?;
    writeln!(
        console,
        "Zip file created at: {}",
        plan.archive_path.display()
    )
    .context(CONSOLE)?;

    Ok(PipelineReport {
        archive_path: plan.archive_path.clone(),
        files_archived,
        cleanup_warnings: report.warnings,
    })
}

fn run_stages(
    plan: &ExtractionPlan,
    staging: &StagingArea,
    runner: &dyn CommandRunner,
    indicator: &dyn LoadingIndicator,
    console: &mut dyn Write,
    stage: &mut Stage,
) -> Result<u64> {
    writeln!(console, "\n--- Starting process ---").context(CONSOLE)?;

    *stage = Stage::Clean;
    {
        let _span = tracing::info_span!("stage", name = %stage).entered();
        writeln!(console, "1. Cleaning temporary directories...").context(CONSOLE)?;
        staging.reset_clone_dir().with_context(|| {
            format!(
                "Failed to prepare clone directory '{}'",
                staging.clone_dir().display()
            )
        })?;
        writeln!(console, "   Temporary directories ready.").context(CONSOLE)?;
    }

    *stage = Stage::Clone;
    {
        let _span = tracing::info_span!("stage", name = %stage).entered();
        let target = &plan.repository.target;
        writeln!(
            console,
            "\n2. Cloning {} repository: {} (branch: {})...",
            target.provider, target.raw_url, plan.branch
        )
        .context(CONSOLE)?;

        let cloned = shallow_clone(
            runner,
            indicator,
            &plan.repository.authenticated_url(),
            &plan.branch,
            staging.clone_dir(),
        );
        if let Err(e) = cloned {
            writeln!(console, "\nGit error while cloning the repository:").context(CONSOLE)?;
            writeln!(console, "   - Message: {}", e.summary()).context(CONSOLE)?;
            writeln!(
                console,
                "   - Possible reasons: branch '{}' does not exist, wrong credentials, \
                 private repository or incorrect URL.",
                plan.branch
            )
            .context(CONSOLE)?;
            return Err(e.into());
        }
        writeln!(console, "   Repository cloned successfully.").context(CONSOLE)?;
    }

    *stage = Stage::Copy;
    {
        let _span = tracing::info_span!("stage", name = %stage).entered();
        writeln!(
            console,
            "\n3. Copying folder '{}' to '{}'...",
            plan.target_folder,
            staging.extract_dir().display()
        )
        .context(CONSOLE)?;

        let source = staging.clone_dir().join(&plan.target_folder);
        if !source.is_dir() {
            return Err(Error::TargetFolderNotFound {
                folder: plan.target_folder.clone(),
            });
        }
        if staging.extract_dir().exists() {
            std::fs::remove_dir_all(staging.extract_dir()).with_context(|| {
                format!(
                    "Failed to remove stale directory '{}'",
                    staging.extract_dir().display()
                )
            })?;
        }
        copy::copy_dir_recursive(&source, staging.extract_dir())?;
        writeln!(console, "   Folder copied successfully.").context(CONSOLE)?;
    }

    *stage = Stage::Archive;
    let _span = tracing::info_span!("stage", name = %stage).entered();
    writeln!(
        console,
        "\n4. Zipping '{}' to '{}'...",
        staging.extract_dir().display(),
        plan.archive_path.display()
    )
    .context(CONSOLE)?;
    if !staging.extract_dir().is_dir() {
        return Err(Error::ArchiveSourceMissing {
            path: staging.extract_dir().display().to_string(),
        });
    }
    let files = archive::write_zip_archive(
        staging.extract_dir(),
        &plan.archive_base_name,
        &plan.archive_path,
    )?;
    writeln!(console, "   Folder zipped successfully.").context(CONSOLE)?;
    Ok(files)
}

fn report_cleanup(report: &CleanupReport, console: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(console, "\n--- Final cleanup ---").context(CONSOLE)?;
    for dir in &report.removed {
        log::debug!("Removed {}", dir.display());
        writeln!(console, "   Temporary directory '{}' removed.", dir.display()).context(CONSOLE)?;
    }
    for warning in &report.warnings {
        log::warn!("{}", warning);
        writeln!(console, "\nWarning: {}", warning).context(CONSOLE)?;
        writeln!(console, "   You may need to remove it manually.").context(CONSOLE)?;
    }
    writeln!(console, "--- End of process ---").context(CONSOLE)?;
    Ok(())
}
