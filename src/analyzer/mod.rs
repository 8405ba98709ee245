//! History Analysis
//!
//! Turns an author's commits into per-file JSON artifacts:
//! - `diff`: unified diff parsing
//! - `history`: per-file commit history scan
//! - `summary`: aggregation and artifact persistence
//! - `scanner`: project-wide orchestration with include/exclude filters

pub mod diff;
pub mod history;
pub mod scanner;
pub mod summary;

pub use diff::parse_diff;
pub use history::{CommitHistoryScanner, current_year_start};
pub use scanner::{FileFilter, ProjectScanOrchestrator, ProjectTotals, ScanFailure, ScanReport};
pub use summary::ChangeSummaryBuilder;
