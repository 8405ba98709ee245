//! Version-Control Boundary
//!
//! Every git query the tool makes goes through [`VcsClient`], so the scan and
//! aggregation logic can run against recorded fixture text in tests.

mod cli;
#[cfg(test)]
pub(crate) mod fixture;

pub use cli::{GitCli, parse_log_output};

use chrono::NaiveDate;

use crate::types::{CommitRecord, Result};

/// Narrow interface over the version-control queries used by the scanner
pub trait VcsClient {
    /// Repository-relative paths of all tracked files
    fn tracked_files(&self) -> Result<Vec<String>>;

    /// Commits by `author` since `since` that touch `path`, most recent first
    fn log_commits(&self, path: &str, author: &str, since: NaiveDate)
    -> Result<Vec<CommitRecord>>;

    /// Patch text of `hash` restricted to `path`
    fn show_diff(&self, hash: &str, path: &str) -> Result<String>;
}
