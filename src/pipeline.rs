//! Run Pipeline
//!
//! Drives one run through its stages:
//!
//! ```text
//! Idle → Scanning → Summarizing → Writing → Done
//!   └────────┴───────────┴───────────┴──→ Failed
//! ```
//!
//! The backend is constructed before the scan starts, so configuration
//! problems surface before any git work or file writes.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{error, info};

use crate::ai::{PromptAssembler, SharedProvider, create_provider, generate_summary};
use crate::analyzer::scanner::{ProjectScanOrchestrator, ScanReport};
use crate::config::RunSettings;
use crate::git::{GitCli, VcsClient};
use crate::report::SummaryWriter;
use crate::types::{Result, YearError};

// =============================================================================
// Stages
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineStage {
    Idle,
    Scanning,
    Summarizing,
    Writing,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scanning => "scanning",
            Self::Summarizing => "summarizing",
            Self::Writing => "writing",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    fn can_advance_to(&self, next: PipelineStage) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Scanning)
                | (Self::Scanning, Self::Summarizing)
                | (Self::Summarizing, Self::Writing)
                | (Self::Writing, Self::Done)
        ) || (next == Self::Failed && !matches!(self, Self::Done | Self::Failed))
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Run Report
// =============================================================================

/// Everything a finished run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub scan: ScanReport,
    pub prompt_path: PathBuf,
    pub summary_path: PathBuf,
}

// =============================================================================
// Pipeline
// =============================================================================

pub struct Pipeline<'a, V: VcsClient> {
    settings: &'a RunSettings,
    vcs: V,
    provider: SharedProvider,
    stage: PipelineStage,
    failed_in: Option<PipelineStage>,
}

impl<'a> Pipeline<'a, GitCli> {
    /// Build a pipeline over the project's git repository
    pub fn new(settings: &'a RunSettings) -> Result<Self> {
        let provider = create_provider(&settings.provider)?;
        let vcs = GitCli::new(&settings.scan.project_path);
        Ok(Self::with_parts(settings, vcs, provider))
    }
}

impl<'a, V: VcsClient> Pipeline<'a, V> {
    pub fn with_parts(settings: &'a RunSettings, vcs: V, provider: SharedProvider) -> Self {
        Self {
            settings,
            vcs,
            provider,
            stage: PipelineStage::Idle,
            failed_in: None,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Stage that was active when the run failed
    pub fn failed_in(&self) -> Option<PipelineStage> {
        self.failed_in
    }

    /// Run every stage in order
    pub async fn run(&mut self) -> Result<RunReport> {
        let scan = self.scan()?;
        let (prompt_path, summary_path) = self.summarize(&scan).await?;
        Ok(RunReport {
            scan,
            prompt_path,
            summary_path,
        })
    }

    /// Scan history and write one artifact per file with commits
    pub fn scan(&mut self) -> Result<ScanReport> {
        self.advance(PipelineStage::Scanning)?;
        let result = ProjectScanOrchestrator::new(&self.vcs, &self.settings.scan).run();
        self.check(result)
    }

    /// Assemble the prompt from the scan's artifacts, call the backend and
    /// write both output files.
    ///
    /// The prompt file is written before the backend call, so it survives a
    /// backend failure.
    pub async fn summarize(&mut self, scan: &ScanReport) -> Result<(PathBuf, PathBuf)> {
        self.advance(PipelineStage::Summarizing)?;
        let writer = SummaryWriter::new(&self.settings.output_dir);

        let assembled = PromptAssembler::new(&scan.artifacts, self.settings.style).assemble();
        let assembled = self.check(assembled)?;
        info!(
            "Prompt built from {} artifacts ({} style)",
            assembled.artifact_count, self.settings.style
        );

        let prompt_path = writer.write_prompt(&assembled.text);
        let prompt_path = self.check(prompt_path)?;

        let response = generate_summary(self.provider.as_ref(), &assembled.text).await;
        let response = self.check(response)?;

        self.advance(PipelineStage::Writing)?;
        let summary_path = writer.write_summary(&response.content);
        let summary_path = self.check(summary_path)?;

        self.advance(PipelineStage::Done)?;
        Ok((prompt_path, summary_path))
    }

    fn advance(&mut self, next: PipelineStage) -> Result<()> {
        if !self.stage.can_advance_to(next) {
            return Err(YearError::Pipeline {
                stage: self.stage,
                message: format!("cannot move to {}", next),
            });
        }
        info!("Pipeline: {} → {}", self.stage, next);
        self.stage = next;
        Ok(())
    }

    /// Record a failure in the current stage and pass the result through
    fn check<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            error!("Pipeline failed during {}: {}", self.stage, e);
            self.failed_in = Some(self.stage);
            self.stage = PipelineStage::Failed;
        }
        result
    }
}
