//! git2-backed commit source.

use chrono::{TimeZone, Utc};
use git2::{Repository, Sort};
use std::path::{Path, PathBuf};

use super::{CommitSource, HistoryError, RawCommit};

/// Commit source reading directly from a local repository.
pub struct GitSource {
    repo: Repository,
}

/// `user.name` / `user.email` from the repository's effective git config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl GitSource {
    /// Open the repository containing `path`. Returns `None` when `path` is not
    /// inside a git working tree.
    pub fn discover(path: &Path) -> Option<Self> {
        match Repository::discover(path) {
            Ok(repo) => Some(Self { repo }),
            Err(e) => {
                tracing::debug!("No git repository at {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Root of the working tree (falls back to the git dir for bare repositories).
    pub fn workdir(&self) -> PathBuf {
        self.repo.workdir().unwrap_or_else(|| self.repo.path()).to_path_buf()
    }

    pub fn identity(&self) -> GitIdentity {
        let Ok(config) = self.repo.config() else {
            return GitIdentity::default();
        };
        let read = |key: &str| config.get_string(key).ok().filter(|v| !v.trim().is_empty());
        GitIdentity { name: read("user.name"), email: read("user.email") }
    }

    /// URL of the `origin` remote, if any.
    pub fn origin_url(&self) -> Option<String> {
        self.repo.find_remote("origin").ok().and_then(|remote| remote.url().map(str::to_string))
    }
}

fn author_display(signature: &git2::Signature<'_>) -> String {
    let name = signature.name().unwrap_or("unknown");
    match signature.email() {
        Some(email) if !email.is_empty() => format!("{name} <{email}>"),
        _ => name.to_string(),
    }
}

impl CommitSource for GitSource {
    fn recent_commits(&self, limit: usize) -> Result<Vec<RawCommit>, HistoryError> {
        let mut walk = self.repo.revwalk()?;
        walk.push_head()?;
        walk.set_sorting(Sort::TIME)?;

        let mut commits = Vec::new();
        for oid in walk.take(limit) {
            let commit = self.repo.find_commit(oid?)?;
            let seconds = commit.author().when().seconds();
            let date = Utc
                .timestamp_opt(seconds, 0)
                .single()
                .ok_or(HistoryError::InvalidTimestamp(seconds))?;
            commits.push(RawCommit {
                hash: commit.id().to_string(),
                author: author_display(&commit.author()),
                date,
                subject: commit.summary().unwrap_or("").trim().to_string(),
            });
        }
        Ok(commits)
    }

    fn changed_files(&self, older: &str, newer: &str) -> Result<Vec<String>, HistoryError> {
        let old_tree = self.repo.revparse_single(older)?.peel_to_tree()?;
        let new_tree = self.repo.revparse_single(newer)?.peel_to_tree()?;
        let diff = self.repo.diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)?;

        let mut files = Vec::new();
        for delta in diff.deltas() {
            let path = delta.new_file().path().or_else(|| delta.old_file().path());
            if let Some(path) = path {
                files.push(crate::utils::normalize_path(&path.to_string_lossy()));
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use git2::{Repository, Signature, Time};
    use std::fs;
    use std::path::Path;

    /// Write `files`, stage them, and commit with a fixed author at `time`.
    pub fn commit_files(repo: &Repository, files: &[(&str, &str)], message: &str, time: i64) {
        let root = repo.workdir().expect("workdir").to_path_buf();
        let mut index = repo.index().expect("index");
        for (name, content) in files {
            let path = root.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("mkdir");
            }
            fs::write(&path, content).expect("write");
            index.add_path(Path::new(name)).expect("add");
        }
        index.write().expect("write index");
        let tree_id = index.write_tree().expect("write tree");
        let tree = repo.find_tree(tree_id).expect("tree");
        let sig = Signature::new("Ada", "ada@example.com", &Time::new(time, 0)).expect("sig");
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents).expect("commit");
    }
}
