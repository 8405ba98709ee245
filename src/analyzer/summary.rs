//! Per-file change aggregation and artifact persistence.
//!
//! Artifacts mirror the source tree: `a/b/c.ext` lands in
//! `<root>/a_diff/b_diff/c_diff.json`.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::constants::artifacts::{DIR_SUFFIX, FILE_SUFFIX};
use crate::types::{
    ArtifactCommit, CommitChange, CommitChangeStats, FileChangeReport, FileInfo,
    FileSummaryArtifact, IoResultExt, Result, SummaryTotals, YearError,
};

/// Builds and writes [`FileSummaryArtifact`]s under one output root
#[derive(Debug, Clone)]
pub struct ChangeSummaryBuilder {
    root: PathBuf,
}

impl ChangeSummaryBuilder {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Summarize a report. `None` for failed scans and files without matching commits.
    pub fn build(report: &FileChangeReport) -> Option<FileSummaryArtifact> {
        match report {
            FileChangeReport::History {
                file_path,
                total_commits,
                changes,
            } if *total_commits > 0 => Some(build_artifact(file_path, *total_commits, changes)),
            _ => None,
        }
    }

    /// Where the artifact for `file_path` is written
    pub fn artifact_path(&self, file_path: &str) -> PathBuf {
        let mut parts: Vec<&str> = file_path.split('/').filter(|p| !p.is_empty()).collect();
        let file_name = parts.pop().unwrap_or(file_path);

        let mut path = self.root.clone();
        for dir in parts {
            path.push(format!("{}{}", dir, DIR_SUFFIX));
        }
        path.push(format!("{}{}", file_stem(file_name), FILE_SUFFIX));
        path
    }

    /// Write the artifact, creating mirrored directories as needed
    pub fn persist(&self, artifact: &FileSummaryArtifact) -> Result<PathBuf> {
        let path = self.artifact_path(&artifact.file_info.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_path(parent)?;
        }

        let json = serde_json::to_string_pretty(artifact)?;
        fs::write(&path, json).with_path(&path)?;
        debug!("Wrote artifact {}", path.display());
        Ok(path)
    }

    /// Remove artifacts left by earlier runs. Other files under the root stay.
    pub fn clear_stale(&self) -> Result<usize> {
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        let mut removed = 0;
        for entry in walker {
            let entry = entry.map_err(|e| YearError::Artifact {
                path: self.root.clone(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            let is_artifact = path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().ends_with(FILE_SUFFIX));
            if is_file && is_artifact {
                fs::remove_file(path).with_path(path)?;
                removed += 1;
            }
        }
        if removed > 0 {
            debug!("Removed {} artifacts from a previous run", removed);
        }
        Ok(removed)
    }
}

fn build_artifact(
    file_path: &str,
    total_commits: usize,
    changes: &[CommitChange],
) -> FileSummaryArtifact {
    let commits: Vec<ArtifactCommit> = changes
        .iter()
        .map(|change| ArtifactCommit {
            date: change.commit.date.clone(),
            message: change.commit.message.clone(),
            author: change.commit.author.clone(),
            changes: CommitChangeStats {
                additions: change.changes.additions.len(),
                deletions: change.changes.deletions.len(),
                added_lines: change
                    .changes
                    .additions
                    .iter()
                    .map(|a| a.content.clone())
                    .collect(),
                deleted_lines: change
                    .changes
                    .deletions
                    .iter()
                    .map(|d| d.content.clone())
                    .collect(),
            },
        })
        .collect();

    FileSummaryArtifact {
        file_info: FileInfo {
            path: file_path.to_string(),
            extension: file_extension(file_path),
        },
        summary: SummaryTotals {
            total_commits,
            total_additions: commits.iter().map(|c| c.changes.additions).sum(),
            total_deletions: commits.iter().map(|c| c.changes.deletions).sum(),
        },
        commits,
    }
}

/// Extension including its dot; dotfiles such as `.gitignore` have none
fn file_extension(file_path: &str) -> String {
    Path::new(file_path)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}
