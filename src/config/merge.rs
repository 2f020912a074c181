//! Layering environment variables and CLI flags over the file config.

use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::path::PathBuf;

use crate::domain::{Config, OutputFormat, Style};

/// Prefix for environment overrides, e.g. `REPO_RESUME_MAX_COMMITS=20` or
/// `REPO_RESUME_LLM__MODEL=...` for nested keys.
pub const ENV_PREFIX: &str = "REPO_RESUME_";

/// Values given on the command line. `None` leaves the lower layer in place.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub max_commits: Option<usize>,
    pub commit_sample: Option<usize>,
    pub style: Option<Style>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub link: Option<String>,
    pub skills: Option<Vec<String>>,
    pub github_user: Option<String>,
    pub no_ai: Option<bool>,
    pub model: Option<String>,
}

/// Overlay `REPO_RESUME_*` environment variables on `config`.
pub fn merge_env_with_config(config: Config) -> Result<Config> {
    merge_env_with_prefix(config, ENV_PREFIX)
}

pub(crate) fn merge_env_with_prefix(config: Config, prefix: &str) -> Result<Config> {
    Figment::from(Serialized::defaults(config))
        .merge(Env::prefixed(prefix).split("__"))
        .extract()
        .with_context(|| format!("Invalid {prefix}* environment override"))
}

/// Apply CLI values on top of the already-layered config.
pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(max_commits) = cli.max_commits {
        config.max_commits = max_commits;
    }
    if let Some(commit_sample) = cli.commit_sample {
        config.commit_sample = commit_sample;
    }
    if let Some(style) = cli.style {
        config.style = style;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(no_ai) = cli.no_ai {
        config.no_ai = no_ai;
    }
    if cli.output.is_some() {
        config.output = cli.output;
    }
    if cli.name.is_some() {
        config.name = cli.name;
    }
    if cli.title.is_some() {
        config.title = cli.title;
    }
    if cli.email.is_some() {
        config.email = cli.email;
    }
    if cli.link.is_some() {
        config.link = cli.link;
    }
    if cli.github_user.is_some() {
        config.github_user = cli.github_user;
    }
    if let Some(skills) = cli.skills {
        config.skills = skills;
    }
    if let Some(model) = cli.model {
        config.llm.model = model;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_values_win_and_absent_values_keep_file_values() {
        let file =
            Config { max_commits: 10, name: Some("File Name".to_string()), ..Default::default() };
        let merged = merge_cli_with_config(
            file,
            CliOverrides {
                style: Some(Style::Developer),
                name: Some("Cli Name".to_string()),
                model: Some("other-model".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(merged.max_commits, 10);
        assert_eq!(merged.style, Style::Developer);
        assert_eq!(merged.name.as_deref(), Some("Cli Name"));
        assert_eq!(merged.llm.model, "other-model");
    }

    #[test]
    fn env_overrides_file_values() {
        let prefix = "REPO_RESUME_MERGE_TEST_";
        std::env::set_var(format!("{prefix}MAX_COMMITS"), "12");
        std::env::set_var(format!("{prefix}STYLE"), "minimal");
        std::env::set_var(format!("{prefix}LLM__MODEL"), "env-model");

        let file =
            Config { max_commits: 3, title: Some("Engineer".to_string()), ..Default::default() };
        let merged = merge_env_with_prefix(file, prefix).expect("merge");
        assert_eq!(merged.max_commits, 12);
        assert_eq!(merged.style, Style::Minimal);
        assert_eq!(merged.llm.model, "env-model");
        assert_eq!(merged.title.as_deref(), Some("Engineer"));

        for key in ["MAX_COMMITS", "STYLE", "LLM__MODEL"] {
            std::env::remove_var(format!("{prefix}{key}"));
        }
    }

    #[test]
    fn bad_env_value_is_an_error() {
        let prefix = "REPO_RESUME_MERGE_BAD_";
        std::env::set_var(format!("{prefix}STYLE"), "fancy");
        assert!(merge_env_with_prefix(Config::default(), prefix).is_err());
        std::env::remove_var(format!("{prefix}STYLE"));
    }
}
