//! Project Scan Orchestration
//!
//! Enumerates tracked files, applies the include/exclude filters in-process,
//! scans each file's history one at a time and persists one artifact per file
//! with matching commits. Per-file failures are collected into the
//! [`ScanReport`] instead of aborting the scan.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::history::CommitHistoryScanner;
use super::summary::ChangeSummaryBuilder;
use crate::config::ScanSettings;
use crate::git::VcsClient;
use crate::types::{FileSummaryArtifact, IoResultExt, Result, YearError};

// =============================================================================
// File Filter
// =============================================================================

/// Include/exclude regular expressions over repository-relative paths
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl FileFilter {
    /// Compile the patterns. Blank patterns are treated as absent.
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self> {
        Ok(Self {
            include: compile("include", include)?,
            exclude: compile("exclude", exclude)?,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.include.as_ref().is_none_or(|re| re.is_match(path))
            && !self.exclude.as_ref().is_some_and(|re| re.is_match(path))
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }
}

fn compile(kind: &str, pattern: Option<&str>) -> Result<Option<Regex>> {
    match pattern.map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(None),
        Some(p) => Regex::new(p).map(Some).map_err(|e| {
            YearError::Config(format!("Invalid {} pattern '{}': {}", kind, p, e))
        }),
    }
}

// =============================================================================
// Scan Report
// =============================================================================

/// A file whose history query failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanFailure {
    pub path: String,
    pub error: String,
}

/// Aggregate counts over every written artifact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectTotals {
    pub total_files: usize,
    pub total_commits: usize,
    pub total_additions: usize,
    pub total_deletions: usize,
}

impl ProjectTotals {
    pub fn add(&mut self, artifact: &FileSummaryArtifact) {
        self.total_files += 1;
        self.total_commits += artifact.summary.total_commits;
        self.total_additions += artifact.summary.total_additions;
        self.total_deletions += artifact.summary.total_deletions;
    }
}

/// Outcome of a project scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Directory holding the artifacts
    pub artifact_root: PathBuf,
    /// Tracked files that passed the filters
    pub files_scanned: usize,
    /// Artifacts written, in scan order
    pub artifacts: Vec<PathBuf>,
    /// Files with no matching commits this year
    pub skipped: usize,
    pub failures: Vec<ScanFailure>,
    pub totals: ProjectTotals,
}

// =============================================================================
// Orchestrator
// =============================================================================

pub struct ProjectScanOrchestrator<'a, V: VcsClient> {
    vcs: &'a V,
    settings: &'a ScanSettings,
}

impl<'a, V: VcsClient> ProjectScanOrchestrator<'a, V> {
    pub fn new(vcs: &'a V, settings: &'a ScanSettings) -> Self {
        Self { vcs, settings }
    }

    /// Tracked files that pass the include/exclude filters
    pub fn select_files(&self) -> Result<Vec<String>> {
        let files = self.vcs.tracked_files()?;
        let total = files.len();
        let selected: Vec<String> = files
            .into_iter()
            .filter(|f| self.settings.filter.matches(f))
            .collect();
        debug!("{} of {} tracked files selected", selected.len(), total);
        Ok(selected)
    }

    pub fn run(&self) -> Result<ScanReport> {
        let root = &self.settings.artifact_root;
        fs::create_dir_all(root).with_path(root)?;

        let files = self.select_files()?;
        info!(
            "Scanning {} files for commits by '{}' since {}",
            files.len(),
            self.settings.author,
            self.settings.since
        );

        let scanner =
            CommitHistoryScanner::new(self.vcs, &self.settings.author, self.settings.since);
        let builder = ChangeSummaryBuilder::new(root);
        builder.clear_stale()?;
        let mut report = ScanReport {
            artifact_root: root.clone(),
            files_scanned: files.len(),
            ..Default::default()
        };
        let mut written = HashSet::new();

        for file in &files {
            let history = scanner.scan_file(file);

            if let Some(error) = history.error() {
                warn!("Skipping {}: {}", file, error);
                report.failures.push(ScanFailure {
                    path: file.clone(),
                    error: error.to_string(),
                });
                continue;
            }

            let Some(artifact) = ChangeSummaryBuilder::build(&history) else {
                report.skipped += 1;
                continue;
            };

            let path = builder.persist(&artifact)?;
            if !written.insert(path.clone()) {
                warn!(
                    "{} maps to an artifact already written this run ({}); overwriting",
                    file,
                    path.display()
                );
            }
            report.totals.add(&artifact);
            report.artifacts.push(path);
        }

        info!(
            "Wrote {} artifacts ({} files without commits, {} failures)",
            report.artifacts.len(),
            report.skipped,
            report.failures.len()
        );
        Ok(report)
    }
}
