// src/git/mod.rs
//! Handles everything specific to the remote repository.
//!
//! This module provides functionality to:
//! - Classify a repository URL as GitHub or Bitbucket and extract owner/name.
//! - Select the provider's credentials and inject them into the clone URL.
//! - Run the shallow clone of one branch through a `CommandRunner`.

// Declare the sub-modules.
mod auth;
mod clone;
mod url;

// Re-export the public-facing API.
pub use auth::{resolve_repository, Credentials, ResolvedRepository, UsernameSource};
pub use clone::{shallow_clone, shallow_clone_args};
pub use url::{Provider, RepositoryTarget};
