//! Per-file commit history scan.

use chrono::{Datelike, Local, NaiveDate};
use tracing::debug;

use super::diff::parse_diff;
use crate::git::VcsClient;
use crate::types::{CommitChange, FileChangeReport, Result};

/// January 1 of the current local year
pub fn current_year_start() -> NaiveDate {
    year_start(Local::now().year())
}

fn year_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Maps an author's commits on one file to parsed diffs
pub struct CommitHistoryScanner<'a, V: VcsClient> {
    vcs: &'a V,
    author: &'a str,
    since: NaiveDate,
}

impl<'a, V: VcsClient> CommitHistoryScanner<'a, V> {
    pub fn new(vcs: &'a V, author: &'a str, since: NaiveDate) -> Self {
        Self { vcs, author, since }
    }

    /// Scan one file. VCS failures are captured in the report, never returned.
    pub fn scan_file(&self, file_path: &str) -> FileChangeReport {
        match self.collect(file_path) {
            Ok(changes) if changes.is_empty() => FileChangeReport::empty(file_path),
            Ok(changes) => FileChangeReport::History {
                file_path: file_path.to_string(),
                total_commits: changes.len(),
                changes,
            },
            Err(e) => FileChangeReport::Failed {
                file_path: file_path.to_string(),
                error: e.to_string(),
            },
        }
    }

    fn collect(&self, file_path: &str) -> Result<Vec<CommitChange>> {
        let commits = self.vcs.log_commits(file_path, self.author, self.since)?;
        debug!("{}: {} matching commits", file_path, commits.len());

        commits
            .into_iter()
            .map(|commit| {
                let patch = self.vcs.show_diff(&commit.hash, file_path)?;
                Ok(CommitChange {
                    changes: parse_diff(&patch),
                    commit,
                })
            })
            .collect()
    }
}
