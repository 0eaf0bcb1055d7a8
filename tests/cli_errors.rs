mod common;

use common::repo_slice_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_repo_url_is_a_configuration_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    repo_slice_cmd()
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration"));

    Ok(())
}

#[test]
fn test_clone_dir_equal_to_working_dir_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    repo_slice_cmd()
        .current_dir(temp.path())
        .args(["--repo-url", "https://github.com/acme/widgets.git"])
        .args(["--clone-dir", "."])
        .assert()
        .failure()
        .code(2);

    assert!(temp.path().exists());
    Ok(())
}

#[test]
fn test_unsupported_provider() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    repo_slice_cmd()
        .current_dir(temp.path())
        .env("REPO_URL", "https://gitlab.com/acme/widgets.git")
        .env("GITHUB_USERNAME", "bob")
        .env("GITHUB_PAT", "s3cret")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("gitlab.com"));

    Ok(())
}

#[test]
fn test_malformed_url() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    repo_slice_cmd()
        .current_dir(temp.path())
        .args(["--repo-url", "not a url"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Invalid repository URL"));

    Ok(())
}

#[test]
fn test_uppercase_scheme_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    repo_slice_cmd()
        .current_dir(temp.path())
        .args(["--repo-url", "HTTPS://github.com/acme/widgets.git"])
        .env("GITHUB_USERNAME", "bob")
        .env("GITHUB_PAT", "s3cret")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("https://"));

    assert!(!temp.path().join("temp_repo_clone").exists());
    Ok(())
}

#[test]
fn test_clone_dir_matching_extraction_dir_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    repo_slice_cmd()
        .current_dir(temp.path())
        .args(["--repo-url", "https://github.com/acme/widgets.git"])
        .args(["--clone-dir", "demo_extracted_temp"])
        .args(["--name", "demo", "--branch", "main"])
        .env("GITHUB_USERNAME", "bob")
        .env("GITHUB_PAT", "s3cret")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("overlaps the extraction directory"));

    Ok(())
}

#[test]
fn test_url_without_repository_name() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    repo_slice_cmd()
        .current_dir(temp.path())
        .args(["--repo-url", "https://github.com/acme"])
        .assert()
        .failure()
        .code(4);

    Ok(())
}

#[test]
fn test_missing_github_credentials() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    repo_slice_cmd()
        .current_dir(temp.path())
        .args(["--repo-url", "https://github.com/acme/widgets.git"])
        .env("GITHUB_USERNAME", "bob")
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("GITHUB_PAT"));

    Ok(())
}

#[test]
fn test_missing_bitbucket_username() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    repo_slice_cmd()
        .current_dir(temp.path())
        .args(["--repo-url", "https://bitbucket.org/team/shop.git"])
        .env("BITBUCKET_APP_PASSWORD", "app-pass")
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("BITBUCKET_USERNAME"));

    Ok(())
}

#[test]
fn test_empty_branch_from_stdin_aborts_before_clone() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    repo_slice_cmd()
        .current_dir(temp.path())
        .args(["--repo-url", "https://github.com/acme/widgets.git"])
        .env("GITHUB_USERNAME", "bob")
        .env("GITHUB_PAT", "s3cret")
        .write_stdin("demo\n\n")
        .assert()
        .failure()
        .code(7)
        .stdout(predicate::str::contains(
            "The zip file will be saved to:",
        ))
        .stderr(predicate::str::contains("The branch name cannot be empty."));

    assert!(!temp.path().join("temp_repo_clone").exists());
    Ok(())
}

#[test]
fn test_empty_archive_name_aborts() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    repo_slice_cmd()
        .current_dir(temp.path())
        .args(["--repo-url", "https://github.com/acme/widgets.git"])
        .env("GITHUB_USERNAME", "bob")
        .env("GITHUB_PAT", "s3cret")
        .write_stdin("   \n")
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("name for the extracted folder"));

    Ok(())
}

#[test]
fn test_unknown_preset_project() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    fs::create_dir(temp.path().join("STG-2FA-equinox-storefront"))?;

    repo_slice_cmd()
        .current_dir(temp.path())
        .args(["--repo-url", "https://github.com/acme/widgets.git"])
        .args(["--project", "aurora"])
        .env("GITHUB_USERNAME", "bob")
        .env("GITHUB_PAT", "s3cret")
        .assert()
        .failure()
        .code(8)
        .stderr(predicate::str::contains("'aurora' is not a valid project name"));

    Ok(())
}

#[test]
fn test_project_prompt_retries_until_match() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    fs::create_dir(temp.path().join("STG-2FA-equinox-storefront"))?;

    // An unknown name and an empty line are retried; the empty branch then ends the run.
    repo_slice_cmd()
        .current_dir(temp.path())
        .args(["--repo-url", "https://github.com/acme/widgets.git"])
        .env("GITHUB_USERNAME", "bob")
        .env("GITHUB_PAT", "s3cret")
        .write_stdin("aurora\n\nEquinox\ndemo\n\n")
        .assert()
        .failure()
        .code(7)
        .stdout(predicate::str::contains(
            "1. equinox (STG-2FA-equinox-storefront)",
        ))
        .stdout(predicate::str::contains("'aurora' is not a valid project name"))
        .stdout(predicate::str::contains("STG-2FA-equinox-storefront").and(
            predicate::str::contains("demo.zip"),
        ));

    Ok(())
}

#[test]
fn test_help_hides_secret_values() -> Result<(), Box<dyn std::error::Error>> {
    repo_slice_cmd()
        .arg("--help")
        .env("GITHUB_PAT", "supersecretvalue")
        .assert()
        .success()
        .stdout(predicate::str::contains("--github-pat"))
        .stdout(predicate::str::contains("supersecretvalue").not());

    Ok(())
}
