//! Persisted per-file summary artifact.
//!
//! Field order matters: artifacts are pretty-printed in declaration order, both
//! on disk and inside the prompt.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummaryArtifact {
    pub file_info: FileInfo,
    pub summary: SummaryTotals,
    pub commits: Vec<ArtifactCommit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Repository-relative path as listed by git
    pub path: String,
    /// Extension with its leading dot, empty when the file has none
    pub extension: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_commits: usize,
    pub total_additions: usize,
    pub total_deletions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactCommit {
    pub date: String,
    pub message: String,
    pub author: String,
    pub changes: CommitChangeStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitChangeStats {
    pub additions: usize,
    pub deletions: usize,
    pub added_lines: Vec<String>,
    pub deleted_lines: Vec<String>,
}
