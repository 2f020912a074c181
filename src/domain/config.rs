//! Run configuration and the enumerated render options.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::synth::merge::{dedup_case_insensitive, parse_user_skills};

pub const DEFAULT_MAX_COMMITS: usize = 50;
pub const DEFAULT_COMMIT_SAMPLE: usize = 20;
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Visual theme understood by the renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Modern,
    Classic,
    Minimal,
    Developer,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Modern => "modern",
            Style::Classic => "classic",
            Style::Minimal => "minimal",
            Style::Developer => "developer",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

/// Text-generation collaborator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Inline API key; takes precedence over `api_key_env`.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Extra attempts after a 429 or 5xx response. Zero means a failed call
    /// goes straight to the template for that section.
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            timeout_secs: 120,
            max_retries: 0,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from the inline value or the configured env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_commits: usize,
    pub commit_sample: usize,
    pub style: Style,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub link: Option<String>,
    #[serde(deserialize_with = "deserialize_csv_list")]
    pub skills: Vec<String>,
    pub github_user: Option<String>,
    pub no_ai: bool,
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_commits: DEFAULT_MAX_COMMITS,
            commit_sample: DEFAULT_COMMIT_SAMPLE,
            style: Style::default(),
            format: OutputFormat::default(),
            output: None,
            name: None,
            title: None,
            email: None,
            link: None,
            skills: Vec::new(),
            github_user: None,
            no_ai: false,
            llm: LlmConfig::default(),
        }
    }
}

/// Accept either a comma-separated string or a list of strings.
fn deserialize_csv_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CsvOrList {
        Csv(String),
        List(Vec<String>),
    }

    Ok(match CsvOrList::deserialize(deserializer)? {
        CsvOrList::Csv(s) => parse_user_skills(&s),
        CsvOrList::List(list) => dedup_case_insensitive(list),
    })
}
