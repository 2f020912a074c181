//! Commit records and the aggregate snapshot derived from one commit window.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::infer::infer_languages;

/// A single commit from the analyzed window. Immutable once extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    /// Free-text `name <email>` display string.
    pub author: String,
    pub date: DateTime<Utc>,
    pub subject: String,
    /// Repository-relative paths changed against the previous commit in the window.
    /// Empty for the oldest commit of the window.
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Read-only aggregate over one window of [`CommitRecord`]s.
///
/// Every field is computed from the same slice, so the date range can never be
/// drawn from a differently-sized sample than the counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub total_commits: usize,
    /// Distinct author display strings in order of first appearance.
    pub authors: Vec<String>,
    pub date_range: Option<DateRange>,
    /// Distinct inferred languages in order of first appearance.
    pub languages: Vec<String>,
}

impl RepositorySnapshot {
    pub fn from_commits(commits: &[CommitRecord]) -> Self {
        let mut authors: Vec<String> = Vec::new();
        for commit in commits {
            if !authors.iter().any(|a| a == &commit.author) {
                authors.push(commit.author.clone());
            }
        }

        let date_range = match (
            commits.iter().map(|c| c.date).min(),
            commits.iter().map(|c| c.date).max(),
        ) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        };

        let languages = infer_languages(commits.iter().flat_map(|c| c.files.iter()));

        Self { total_commits: commits.len(), authors, date_range, languages }
    }

    pub fn is_empty(&self) -> bool {
        self.total_commits == 0
    }

    /// Human-readable duration label for the window, e.g. `Jan 2024 - Mar 2025`.
    pub fn duration_label(&self) -> String {
        self.date_range.map(format_duration_label).unwrap_or_else(|| "Ongoing".to_string())
    }
}

/// Format a date range as `Mon YYYY - Mon YYYY`, collapsing to a single month
/// when both bounds fall in the same month.
pub fn format_duration_label(range: DateRange) -> String {
    let start = range.start.format("%b %Y").to_string();
    if range.start.year() == range.end.year() && range.start.month() == range.end.month() {
        return start;
    }
    format!("{} - {}", start, range.end.format("%b %Y"))
}
