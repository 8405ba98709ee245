//! code-year-summary - A Year of Commits, Narrated
//!
//! Scans a git repository for one author's commits in the current calendar
//! year, writes per-file JSON change artifacts, and asks an LLM backend to
//! turn them into a "year in code" story.
//!
//! ## Flow
//!
//! 1. **Scan**: `git ls-files` → per-file `git log` → `git show` → diff parse
//! 2. **Persist**: one artifact per file under `<project>/file_diff/`
//! 3. **Prompt**: every artifact embedded in a style template
//! 4. **Summarize**: one call to Ollama, OpenAI or Claude
//! 5. **Write**: `prompt-<ts>.txt` and `summary-<ts>.md` in the output dir
//!
//! ## Quick Start
//!
//! ```ignore
//! use code_year_summary::{Config, Pipeline, RunSettings, config::CliOverrides};
//!
//! let settings = RunSettings::resolve(&project, Config::default(), overrides, || None)?;
//! let report = Pipeline::new(&settings)?.run().await?;
//! println!("{}", report.summary_path.display());
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: diff parsing, history scan, artifact aggregation
//! - [`git`]: version-control boundary
//! - [`ai`]: prompt assembly and LLM backends
//! - [`report`]: prompt and summary files
//! - [`pipeline`]: the run state machine

pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod git;
pub mod pipeline;
pub mod report;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{BackendKind, Config, ConfigLoader, RunSettings};
pub use types::{Result, YearError};

pub use pipeline::{Pipeline, PipelineStage, RunReport};

pub use ai::{LlmProvider, LlmResponse, SummaryStyle};
pub use analyzer::{ScanReport, parse_diff};
