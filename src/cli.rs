// src/cli.rs

use clap::Parser;

/// Extracts one folder of a GitHub or Bitbucket repository into a zip archive.
///
/// repo-slice shallow-clones a single branch of the configured repository,
/// copies the configured folder out of it and packs that folder into
/// `<name>.zip`, either in the current directory or inside a sibling
/// `STG-2FA-<project>-...` project folder. Temporary directories are always
/// removed afterwards. Any value not given on the command line or in the
/// environment (project, archive name, branch) is asked for interactively.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    // --- Repository Options ---
    /// Full https URL of the repository to clone.
    #[arg(long, env = "REPO_URL", value_name = "URL")]
    pub repo_url: Option<String>,

    /// Folder inside the repository to extract.
    #[arg(long, env = "TARGET_FOLDER", value_name = "PATH", default_value = "cartridges")]
    pub target_folder: String,

    /// Temporary directory the repository is cloned into (removed after the run).
    #[arg(long, env = "CLONE_DIR", value_name = "PATH", default_value = "./temp_repo_clone")]
    pub clone_dir: String,

    /// Prefix identifying project folders in the current directory.
    #[arg(long, env = "PROJECT_PREFIX", value_name = "PREFIX", default_value = "STG-2FA-")]
    pub project_prefix: String,

    // --- Credentials ---
    /// GitHub username.
    #[arg(long, env = "GITHUB_USERNAME", value_name = "USER")]
    pub github_username: Option<String>,

    /// GitHub personal access token.
    #[arg(long, env = "GITHUB_PAT", value_name = "TOKEN", hide_env_values = true)]
    pub github_pat: Option<String>,

    /// Bitbucket username (ignored when the URL contains one).
    #[arg(long, env = "BITBUCKET_USERNAME", value_name = "USER")]
    pub bitbucket_username: Option<String>,

    /// Bitbucket app password.
    #[arg(
        long,
        env = "BITBUCKET_APP_PASSWORD",
        value_name = "PASSWORD",
        hide_env_values = true
    )]
    pub bitbucket_app_password: Option<String>,

    // --- Answers (skip the matching prompt) ---
    /// Project to place the archive in, by its short name (e.g. equinox).
    #[arg(short = 'p', long, value_name = "PROJECT")]
    pub project: Option<String>,

    /// Name of the extracted folder and of the zip file (without extension).
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Branch to clone.
    #[arg(short = 'b', long, value_name = "BRANCH")]
    pub branch: Option<String>,

    // --- Output Options ---
    /// Do not show the spinner while cloning.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_progress: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_answers_parse() {
        let cli = Cli::parse_from([
            "repo-slice",
            "--repo-url",
            "https://github.com/acme/widgets.git",
            "-p",
            "equinox",
            "-n",
            "demo",
            "-b",
            "main",
        ]);
        assert_eq!(
            cli.repo_url.as_deref(),
            Some("https://github.com/acme/widgets.git")
        );
        assert_eq!(cli.project.as_deref(), Some("equinox"));
        assert_eq!(cli.name.as_deref(), Some("demo"));
        assert_eq!(cli.branch.as_deref(), Some("main"));
        assert!(!cli.no_progress);
    }
}
