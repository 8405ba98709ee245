//! Summary Command
//!
//! Scan the year's history, ask the backend for a narrative and print what
//! was written.

use std::path::{Path, PathBuf};

use crate::cli::Output;
use crate::config::{CliOverrides, ConfigLoader, RunSettings};
use crate::git::GitCli;
use crate::analyzer::ScanReport;
use crate::pipeline::{Pipeline, RunReport};
use crate::types::{IoResultExt, Result};

/// Resolve the project path: the given path, or the current directory
pub fn project_root(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(p) => p.canonicalize().with_path(&p),
        None => Ok(std::env::current_dir()?),
    }
}

/// Load config and resolve settings; every configuration error surfaces here
pub fn prepare(project_root: &Path, overrides: CliOverrides) -> Result<RunSettings> {
    let config = ConfigLoader::load(project_root)?;
    let git = GitCli::new(project_root);
    RunSettings::resolve(project_root, config, overrides, || git.configured_author())
}

pub async fn run(settings: &RunSettings, output: &Output) -> Result<RunReport> {
    output.header("Code Year Summary");
    output.field("Project", settings.scan.project_path.display());
    output.field("Author", &settings.scan.author);
    output.field("Since", settings.scan.since);
    output.field(
        "Backend",
        format!("{} ({})", settings.provider.backend, settings.provider.model),
    );
    output.field("Style", settings.style);

    let mut pipeline = Pipeline::new(settings)?;
    let report = pipeline.run().await?;

    print_report(&report, output);
    Ok(report)
}

fn print_report(report: &RunReport, output: &Output) {
    let scan = &report.scan;

    output.section("Scan");
    output.field("Files scanned", scan.files_scanned);
    output.field("Artifacts written", scan.artifacts.len());
    output.field("Without commits", scan.skipped);
    output.field("Artifact root", scan.artifact_root.display());

    for line in failure_lines(scan) {
        output.error(&line);
    }

    output.section("Year totals");
    output.field("Files", scan.totals.total_files);
    output.field("Commits", scan.totals.total_commits);
    output.field("Lines added", scan.totals.total_additions);
    output.field("Lines deleted", scan.totals.total_deletions);

    println!();
    output.success(&format!("Prompt:  {}", report.prompt_path.display()));
    output.success(&format!("Summary: {}", report.summary_path.display()));
}

/// One line per file whose history could not be read
fn failure_lines(scan: &ScanReport) -> Vec<String> {
    scan.failures
        .iter()
        .map(|f| format!("Skipped {}: {}", f.path, f.error))
        .collect()
}
