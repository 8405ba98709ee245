//! Commit and line-change types produced by the history scan.

use serde::{Deserialize, Serialize};

/// One commit returned by the log query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub author: String,
    /// Commit subject line
    pub message: String,
}

/// Added line, numbered in the new-file coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addition {
    pub line: u32,
    pub content: String,
}

/// Deleted line. Carries no line number: it refers to the old file state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deletion {
    pub content: String,
}

/// A single classified diff line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineChange {
    Addition(Addition),
    Deletion(Deletion),
}

/// Additions and deletions of one file at one commit, in diff order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub additions: Vec<Addition>,
    pub deletions: Vec<Deletion>,
}

impl DiffResult {
    pub fn push(&mut self, change: LineChange) {
        match change {
            LineChange::Addition(a) => self.additions.push(a),
            LineChange::Deletion(d) => self.deletions.push(d),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }
}

/// A commit paired with the parsed diff it applied to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitChange {
    pub commit: CommitRecord,
    pub changes: DiffResult,
}

/// Outcome of scanning one file's history.
///
/// `Failed` must be checked before the report is treated as a valid history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChangeReport {
    History {
        file_path: String,
        total_commits: usize,
        changes: Vec<CommitChange>,
    },
    Failed {
        file_path: String,
        error: String,
    },
}

impl FileChangeReport {
    pub fn empty(file_path: impl Into<String>) -> Self {
        Self::History {
            file_path: file_path.into(),
            total_commits: 0,
            changes: Vec::new(),
        }
    }

    pub fn file_path(&self) -> &str {
        match self {
            Self::History { file_path, .. } | Self::Failed { file_path, .. } => file_path,
        }
    }

    /// Number of matching commits; zero for failed scans
    pub fn total_commits(&self) -> usize {
        match self {
            Self::History { total_commits, .. } => *total_commits,
            Self::Failed { .. } => 0,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error, .. } => Some(error),
            Self::History { .. } => None,
        }
    }
}
