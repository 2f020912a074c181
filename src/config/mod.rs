//! Configuration loading and merging
//!
//! Handles loading from config files, environment variables, and CLI arguments
//! with precedence CLI > Env > File > Defaults.

use anyhow::Result;
use std::path::Path;

use crate::domain::Config;

pub mod loader;
pub mod merge;

pub use loader::{load_config, CONFIG_CANDIDATES};
pub use merge::{merge_cli_with_config, merge_env_with_config, CliOverrides, ENV_PREFIX};

/// Resolve the effective config for a run rooted at `project_root`.
pub fn resolve_config(
    project_root: &Path,
    config_path: Option<&Path>,
    cli: CliOverrides,
) -> Result<Config> {
    let file_config = load_config(project_root, config_path)?;
    let layered = merge_env_with_config(file_config)?;
    Ok(merge_cli_with_config(layered, cli))
}
