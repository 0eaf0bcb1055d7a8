// src/constants.rs

/// Host name of repositories classified as GitHub.
pub const GITHUB_HOST: &str = "github.com";

/// Host name of repositories classified as Bitbucket.
pub const BITBUCKET_HOST: &str = "bitbucket.org";

/// Folder inside the repository that is extracted when none is configured.
pub const DEFAULT_TARGET_FOLDER: &str = "cartridges";

/// Staging directory the repository is cloned into.
pub const DEFAULT_CLONE_DIR: &str = "./temp_repo_clone";

/// Literal prefix of sibling project folders (`STG-2FA-<project>-...`).
pub const DEFAULT_PROJECT_PREFIX: &str = "STG-2FA-";

/// Dependency cache directory that is never offered as a project folder.
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Suffix of the directory holding the extracted folder before it is zipped.
pub const EXTRACTED_TEMP_SUFFIX: &str = "_extracted_temp";

/// Extension of the generated archive.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Upper bound for the combined stdout/stderr captured from a subprocess.
pub const MAX_COMMAND_OUTPUT_BYTES: usize = 5 * 1024 * 1024;

/// Interval between two frames of the clone spinner.
pub const LOADING_TICK_INTERVAL_MS: u64 = 300;

/// Version-control client invoked for the shallow clone.
pub const GIT_PROGRAM: &str = "git";

// Environment variables holding provider credentials.
pub const ENV_GITHUB_USERNAME: &str = "GITHUB_USERNAME";
pub const ENV_GITHUB_PAT: &str = "GITHUB_PAT";
pub const ENV_BITBUCKET_USERNAME: &str = "BITBUCKET_USERNAME";
pub const ENV_BITBUCKET_APP_PASSWORD: &str = "BITBUCKET_APP_PASSWORD";
