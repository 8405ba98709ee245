//! Config Command
//!
//! Usage:
//!   code-year-summary config show [-f toml|json]
//!   code-year-summary config path
//!   code-year-summary config init [--force]

use std::path::Path;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::{Result, YearError};

/// Print the merged configuration for a project
pub fn show(project_root: &Path, format: &str) -> Result<()> {
    let as_json = match format {
        "json" => true,
        "toml" => false,
        other => {
            return Err(YearError::Config(format!(
                "Invalid format '{}'. Valid values: toml, json",
                other
            )));
        }
    };

    let config = ConfigLoader::load(project_root)?;
    println!("{}", ConfigLoader::render(&config, as_json)?);
    Ok(())
}

/// Show configuration paths
pub fn path(project_root: &Path) -> Result<()> {
    ConfigLoader::show_path(project_root);
    Ok(())
}

/// Initialize global configuration
pub fn init_global(force: bool) -> Result<()> {
    let path = ConfigLoader::init_global(force)?;
    let output = Output::new();
    output.success("Initialized global configuration");
    output.field("Config", path.display());
    Ok(())
}
