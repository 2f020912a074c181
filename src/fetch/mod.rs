//! Inputs from outside the repository: local root discovery and profile import.

pub mod github;
pub mod local;
pub mod profile;

pub use github::GitHubClient;
pub use local::{find_repo_root, resolve_project_root, validate_local_path};
pub use profile::{ImportError, ImportedProfile, ProfileSource, RepoSummary};
