//! Config file discovery and parsing

use crate::domain::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Files looked up in the project root when no `--config` is given.
pub const CONFIG_CANDIDATES: [&str; 6] = [
    "repo-resume.toml",
    ".repo-resume.toml",
    "repo-resume.yml",
    ".repo-resume.yml",
    "repo-resume.yaml",
    ".repo-resume.yaml",
];

/// Table names that may wrap the settings inside a shared config file.
const NESTED_SECTIONS: [&str; 2] = ["repo-resume", "resume"];

/// Load the config file for `project_root`.
///
/// An explicit `config_path` must exist and parse. An auto-discovered file
/// that fails to parse only logs a warning and yields the defaults.
pub fn load_config(project_root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let explicit = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(project_root),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    match parse_config_file(&config_file) {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if explicit => Err(e),
        Err(e) => {
            tracing::warn!("Ignoring auto-discovered config {}: {:#}", config_file.display(), e);
            Ok(Config::default())
        }
    }
}

fn parse_config_file(config_file: &Path) -> Result<Config> {
    let content = fs::read_to_string(config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => parse_toml_config(&content, config_file),
        "yaml" | "yml" => parse_yaml_config(&content, config_file),
        other => anyhow::bail!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        ),
    }
}

/// Parse TOML config, supporting nested `[repo-resume]` or `[resume]` tables.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val =
        NESTED_SECTIONS.iter().find_map(|section| raw.get(*section)).cloned().unwrap_or(raw);

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting nested `repo-resume` or `resume` mappings.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    // An empty YAML document parses as null.
    if raw.is_null() {
        return Ok(Config::default());
    }

    let config_val =
        NESTED_SECTIONS.iter().find_map(|section| raw.get(*section)).cloned().unwrap_or(raw);

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(project_root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| project_root.join(candidate))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OutputFormat, Style};
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_load_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("repo-resume.toml"),
            "max_commits = 10\nstyle = 'classic'\nformat = 'markdown'\n\n[llm]\nmodel = 'custom-model'\n",
        )
        .expect("write");

        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.max_commits, 10);
        assert_eq!(cfg.style, Style::Classic);
        assert_eq!(cfg.format, OutputFormat::Markdown);
        assert_eq!(cfg.llm.model, "custom-model");
        assert_eq!(cfg.llm.max_retries, 0);
    }

    #[test]
    fn test_nested_sections() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("shared.toml");
        fs::write(&path, "[other]\nx = 1\n\n[repo-resume]\nname = 'Ada'\n").expect("write");
        let cfg = load_config(tmp.path(), Some(&path)).expect("config");
        assert_eq!(cfg.name.as_deref(), Some("Ada"));

        let path = tmp.path().join("shared.yaml");
        fs::write(&path, "resume:\n  title: Engineer\n  skills: Rust, Go\n").expect("write");
        let cfg = load_config(tmp.path(), Some(&path)).expect("config");
        assert_eq!(cfg.title.as_deref(), Some("Engineer"));
        assert_eq!(cfg.skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_candidate_order() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("repo-resume.yml"), "max_commits: 7\n").expect("write");
        fs::write(tmp.path().join(".repo-resume.toml"), "max_commits = 5\n").expect("write");
        let cfg = load_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.max_commits, 5);
    }

    #[test]
    fn test_explicit_config_invalid_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "max_commits = 'many'\n").expect("write");
        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_missing_or_unsupported_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        assert!(load_config(tmp.path(), Some(&tmp.path().join("absent.toml"))).is_err());

        let path = tmp.path().join("config.ini");
        fs::write(&path, "max_commits=1").expect("write");
        assert!(load_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("repo-resume.toml"), "style = 'fancy'\n").expect("write");
        let cfg = load_config(tmp.path(), None).expect("should not error on auto-discovery");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("repo-resume.yaml"), "").expect("write");
        assert_eq!(load_config(tmp.path(), None).expect("config"), Config::default());
    }
}
