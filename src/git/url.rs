//! Handles parsing and classification of repository URLs.

use crate::constants::{BITBUCKET_HOST, GITHUB_HOST};
use crate::errors::{Error, Result};
use std::fmt;
use url::Url;

/// The hosting service a repository URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    GitHub,
    Bitbucket,
}

impl Provider {
    /// Classifies a host name, returning `None` for unrecognized hosts.
    pub fn from_host(host: &str) -> Option<Self> {
        if host.eq_ignore_ascii_case(GITHUB_HOST) {
            Some(Provider::GitHub)
        } else if host.eq_ignore_ascii_case(BITBUCKET_HOST) {
            Some(Provider::Bitbucket)
        } else {
            None
        }
    }

    /// The host name of this provider.
    pub fn host(&self) -> &'static str {
        match self {
            Provider::GitHub => GITHUB_HOST,
            Provider::Bitbucket => BITBUCKET_HOST,
        }
    }

    /// The URL shape shown to the operator when a URL is rejected.
    pub fn expected_url_shape(&self) -> &'static str {
        match self {
            Provider::GitHub => "https://github.com/owner/repo.git",
            Provider::Bitbucket => "https://[user@]bitbucket.org/workspace/repo.git",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::GitHub => f.write_str("github"),
            Provider::Bitbucket => f.write_str("bitbucket"),
        }
    }
}

const GENERIC_URL_SHAPE: &str =
    "https://github.com/owner/repo.git or https://[user@]bitbucket.org/workspace/repo.git";

/// A repository URL classified by provider.
///
/// Derived once from the configured URL and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    /// Provider, decided solely by the URL host.
    pub provider: Provider,
    /// First non-empty path segment (user, organization or workspace).
    pub owner: String,
    /// Second non-empty path segment without a trailing `.git`.
    pub name: String,
    /// The URL exactly as configured.
    pub raw_url: String,
    /// Username embedded in a Bitbucket URL (`https://user@bitbucket.org/...`).
    pub embedded_username: Option<String>,
}

impl RepositoryTarget {
    /// Parses and classifies a repository URL.
    ///
    /// # Errors
    /// * `InvalidRepositoryUrl` if the URL is malformed, not `https`, has fewer
    ///   than two path segments, or already carries credentials that would be
    ///   injected again.
    /// * `UnsupportedProvider` if the host is neither GitHub nor Bitbucket.
    ///
    /// # Examples
    /// ```
    /// use repo_slice::git::{Provider, RepositoryTarget};
    ///
    /// let target = RepositoryTarget::parse("https://github.com/rust-lang/cargo.git").unwrap();
    /// assert_eq!(target.provider, Provider::GitHub);
    /// assert_eq!(target.owner, "rust-lang");
    /// assert_eq!(target.name, "cargo");
    ///
    /// let target = RepositoryTarget::parse("https://alice@bitbucket.org/team/site.git").unwrap();
    /// assert_eq!(target.provider, Provider::Bitbucket);
    /// assert_eq!(target.embedded_username.as_deref(), Some("alice"));
    /// ```
    pub fn parse(raw_url: &str) -> Result<Self> {
        let invalid = |reason: &str, expected: &str| Error::InvalidRepositoryUrl {
            url: raw_url.to_string(),
            reason: reason.to_string(),
            expected: expected.to_string(),
        };

        let parsed = Url::parse(raw_url.trim())
            .map_err(|e| invalid(&format!("not a well-formed URL ({})", e), GENERIC_URL_SHAPE))?;

        let host = parsed.host_str().unwrap_or_default();
        let provider = Provider::from_host(host).ok_or_else(|| Error::UnsupportedProvider {
            host: host.to_string(),
            url: raw_url.to_string(),
        })?;
        let expected = provider.expected_url_shape();

        if parsed.scheme() != "https" {
            return Err(invalid(
                &format!("scheme '{}' is not supported, use https", parsed.scheme()),
                expected,
            ));
        }
        // Credentials are injected into the raw text, so it must spell the scheme exactly.
        if !raw_url.trim().starts_with("https://") {
            return Err(invalid("the URL must start with a lowercase 'https://'", expected));
        }

        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        if segments.len() < 2 {
            return Err(invalid("missing owner and repository name", expected));
        }
        let owner = segments[0].to_string();
        let name = segments[1]
            .strip_suffix(".git")
            .unwrap_or(segments[1])
            .to_string();
        if name.is_empty() {
            return Err(invalid("empty repository name", expected));
        }

        if parsed.password().is_some() {
            return Err(invalid(
                "the URL already contains a password; configure it as a secret instead",
                expected,
            ));
        }

        let embedded_username = match (provider, parsed.username()) {
            (_, "") => None,
            (Provider::Bitbucket, user) => {
                if !raw_url.trim().starts_with(&format!("https://{}@", user)) {
                    return Err(invalid(
                        "the username in the URL must not contain escaped characters",
                        expected,
                    ));
                }
                Some(user.to_string())
            }
            (Provider::GitHub, _) => {
                return Err(invalid(
                    "GitHub URLs must not contain a username; configure it instead",
                    expected,
                ))
            }
        };

        Ok(Self {
            provider,
            owner,
            name,
            raw_url: raw_url.trim().to_string(),
            embedded_username,
        })
    }
}
