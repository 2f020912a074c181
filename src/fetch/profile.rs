//! Imported developer profile and the source trait used to fetch one.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder used when a repository has neither a description nor a usable README.
pub const NO_DESCRIPTION: &str = "No description provided.";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid profile handle: {0:?}")]
    InvalidHandle(String),

    #[error("profile not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    /// Repository description, README-derived text, or [`NO_DESCRIPTION`].
    pub description: String,
    pub link: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub link: Option<String>,
    /// Primary languages across the imported repositories, most used first.
    pub languages: Vec<String>,
    pub repositories: Vec<RepoSummary>,
}

/// Handle → profile lookup.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, handle: &str) -> Result<ImportedProfile, ImportError>;
}

/// GitHub login: alphanumerics and hyphens, no leading hyphen, at most 39 chars.
static HANDLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{0,38}$").expect("valid regex"));

/// Accept `octocat`, `@octocat`, or a `github.com/octocat` URL.
pub fn normalize_handle(raw: &str) -> Result<String, ImportError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let handle = trimmed
        .rsplit_once("github.com/")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed)
        .trim_start_matches('@');
    let handle = handle.split('/').next().unwrap_or("");

    let valid = HANDLE_PATTERN.is_match(handle);
    if valid {
        Ok(handle.to_string())
    } else {
        Err(ImportError::InvalidHandle(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_normalized() {
        assert_eq!(normalize_handle("octocat").expect("plain"), "octocat");
        assert_eq!(normalize_handle(" @octocat ").expect("at"), "octocat");
        assert_eq!(normalize_handle("https://github.com/octo-cat/").expect("url"), "octo-cat");
        assert_eq!(
            normalize_handle("github.com/octocat/hello-world").expect("repo url"),
            "octocat"
        );
    }

    #[test]
    fn bad_handles_are_rejected() {
        for raw in ["", "   ", "-leading", "has space", "semi;colon"] {
            assert!(matches!(normalize_handle(raw), Err(ImportError::InvalidHandle(_))), "{raw:?}");
        }
    }
}
