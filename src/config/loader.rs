//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/code-year-summary/config.toml)
//! 3. Project config (<project>/.code-year-summary.toml)
//! 4. Environment variables (CODE_YEAR_SUMMARY_* prefix, `__` separates sections)
//!
//! CLI flags are applied on top by [`super::RunSettings::resolve`].

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{IoResultExt, Result, YearError};

const APP_DIR: &str = "code-year-summary";
const PROJECT_CONFIG_FILE: &str = ".code-year-summary.toml";
const ENV_PREFIX: &str = "CODE_YEAR_SUMMARY_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project → env vars
    pub fn load(project_root: &Path) -> Result<Config> {
        Self::load_from_sources(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(project_root),
        )
    }

    /// Load configuration from explicit global/project files plus the environment
    pub fn load_from_sources(global: Option<&Path>, project: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(project));
        }

        // e.g. CODE_YEAR_SUMMARY_LLM__API_KEY -> llm.api_key
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| YearError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/code-year-summary/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join(APP_DIR))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_CONFIG_FILE)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path(project_root: &Path) {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path(project_root);
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
        println!("  Env:     {}<SECTION>__<KEY>", ENV_PREFIX);
    }

    /// Render the effective configuration as TOML or JSON
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| YearError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the default global configuration; returns its path
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            YearError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::init_at(&global_dir.join("config.toml"), force)
    }

    fn init_at(config_path: &Path, force: bool) -> Result<PathBuf> {
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir).with_path(dir)?;
        }

        if !config_path.exists() || force {
            fs::write(config_path, Self::default_global_config()).with_path(config_path)?;
            info!("Created global config: {}", config_path.display());
        } else {
            info!("Global config exists: {}", config_path.display());
        }

        Ok(config_path.to_path_buf())
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default global config content (TOML)
    fn default_global_config() -> String {
        r#"# code-year-summary Global Configuration
# Project settings in <project>/.code-year-summary.toml override these.

version = "1.0"

[scan]
# author = "Your Name"        # defaults to `git config user.name`
# include = '\.rs$'
# exclude = 'test'
diff_dir = "file_diff"

# AI backend: ollama, openai, claude
[llm]
backend = "ollama"
# model = "llama3"
# base_url = "http://localhost:11434"
timeout_secs = 300
max_tokens = 4096

[summary]
style = "crazy"                # crazy, encourage
"#
        .to_string()
    }
}
