//! Commit history extraction over a bounded window.
//!
//! The extractor asks a [`CommitSource`] for the newest N commits and then
//! diffs each adjacent pair inside the window. The oldest commit of the window
//! has nothing to diff against and always carries an empty file list, even
//! when it is not the repository's root commit.

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::CommitRecord;

pub mod git;

pub use git::{GitIdentity, GitSource};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("invalid commit timestamp {0}")]
    InvalidTimestamp(i64),
}

/// A commit as reported by the version-control collaborator, before diffing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    pub hash: String,
    pub author: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub subject: String,
}

/// Version-control collaborator used by the extractor.
pub trait CommitSource {
    /// Up to `limit` most recent commits, newest first.
    fn recent_commits(&self, limit: usize) -> Result<Vec<RawCommit>, HistoryError>;

    /// Paths that differ between two revisions.
    fn changed_files(&self, older: &str, newer: &str) -> Result<Vec<String>, HistoryError>;
}

/// Extract at most `max_commits` records, newest first, each annotated with
/// the files it changed relative to the next-older commit in the window.
///
/// Any log or diff failure yields an empty vector; callers report that as
/// "no history available".
pub fn extract_history(source: &dyn CommitSource, max_commits: usize) -> Vec<CommitRecord> {
    match try_extract_history(source, max_commits) {
        Ok(records) => records,
        Err(e) => {
            warn!("Failed to read commit history: {}", e);
            Vec::new()
        }
    }
}

fn try_extract_history(
    source: &dyn CommitSource,
    max_commits: usize,
) -> Result<Vec<CommitRecord>, HistoryError> {
    if max_commits == 0 {
        return Ok(Vec::new());
    }

    let mut raw = source.recent_commits(max_commits)?;
    raw.truncate(max_commits);
    debug!("Read {} commits (limit {})", raw.len(), max_commits);

    let mut records = Vec::with_capacity(raw.len());
    for (idx, commit) in raw.iter().enumerate() {
        let files = match raw.get(idx + 1) {
            Some(older) => source.changed_files(&older.hash, &commit.hash)?,
            None => Vec::new(),
        };
        records.push(CommitRecord {
            hash: commit.hash.clone(),
            author: commit.author.clone(),
            date: commit.date,
            subject: commit.subject.clone(),
            files,
        });
    }

    Ok(records)
}
