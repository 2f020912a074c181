//! Shared CLI utilities.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::resolve_project_root;
use crate::synth::parse_user_skills;

/// Split a `--skills` value into distinct skills. Returns `None` when the flag
/// was not given.
pub fn parse_skills_arg(value: Option<&str>) -> Option<Vec<String>> {
    value.map(parse_user_skills)
}

/// Project root for an optional path argument (current directory by default).
pub fn project_root(path: Option<&Path>) -> Result<PathBuf> {
    let start = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };
    resolve_project_root(&start)
}

pub fn interactive_terminal() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Steady-ticking spinner on stderr. Hidden automatically when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
