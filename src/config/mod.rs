//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/code-year-summary/config.toml)
//! 3. Project config (<project>/.code-year-summary.toml)
//! 4. Environment variables (CODE_YEAR_SUMMARY_*)
//! 5. CLI arguments (highest priority)

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::{CliOverrides, RunSettings, ScanSettings};
pub use types::*;
