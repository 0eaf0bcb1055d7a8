// tests/common.rs

use assert_cmd::Command;

/// Environment variables the binary reads; cleared so the host setup cannot leak in.
const APP_ENV_VARS: &[&str] = &[
    "REPO_URL",
    "TARGET_FOLDER",
    "CLONE_DIR",
    "PROJECT_PREFIX",
    "GITHUB_USERNAME",
    "GITHUB_PAT",
    "BITBUCKET_USERNAME",
    "BITBUCKET_APP_PASSWORD",
];

// Helper function to get the binary command
#[allow(dead_code)] // This is used by many integration tests, but not all.
pub fn repo_slice_cmd() -> Command {
    let mut cmd = Command::from_std(std::process::Command::new(
        assert_cmd::cargo::cargo_bin!("repo-slice"),
    ));
    for var in APP_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "off");
    cmd
}
