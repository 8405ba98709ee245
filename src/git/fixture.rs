//! In-memory [`VcsClient`] backed by recorded log and diff text.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::VcsClient;
use crate::types::{CommitRecord, Result, YearError};

#[derive(Debug, Default)]
pub(crate) struct FixtureVcs {
    files: Vec<String>,
    commits: HashMap<String, Vec<CommitRecord>>,
    diffs: HashMap<(String, String), String>,
    failing: Vec<String>,
}

impl FixtureVcs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.files.push(path.to_string());
        self
    }

    /// Record a commit touching `path` with the given patch text
    pub fn with_commit(mut self, path: &str, hash: &str, message: &str, diff: &str) -> Self {
        if !self.files.iter().any(|f| f == path) {
            self.files.push(path.to_string());
        }
        self.commits
            .entry(path.to_string())
            .or_default()
            .push(CommitRecord {
                hash: hash.to_string(),
                date: "2026-02-03".to_string(),
                author: "Ada".to_string(),
                message: message.to_string(),
            });
        self.diffs
            .insert((hash.to_string(), path.to_string()), diff.to_string());
        self
    }

    /// Make every log query for `path` fail
    pub fn with_failure(mut self, path: &str) -> Self {
        if !self.files.iter().any(|f| f == path) {
            self.files.push(path.to_string());
        }
        self.failing.push(path.to_string());
        self
    }
}

impl VcsClient for FixtureVcs {
    fn tracked_files(&self) -> Result<Vec<String>> {
        Ok(self.files.clone())
    }

    fn log_commits(
        &self,
        path: &str,
        author: &str,
        _since: NaiveDate,
    ) -> Result<Vec<CommitRecord>> {
        if self.failing.iter().any(|f| f == path) {
            return Err(YearError::git("log", "fatal: bad revision"));
        }
        Ok(self
            .commits
            .get(path)
            .map(|c| c.iter().filter(|r| r.author == author).cloned().collect())
            .unwrap_or_default())
    }

    fn show_diff(&self, hash: &str, path: &str) -> Result<String> {
        self.diffs
            .get(&(hash.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| YearError::git("show", format!("unknown revision {}", hash)))
    }
}
