//! Resolved run settings.
//!
//! `RunSettings` is built once at startup from the merged [`Config`] and the
//! CLI flags, validated, and then passed by reference to every component.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::warn;

use super::types::{BackendKind, Config};
use crate::ai::prompt::SummaryStyle;
use crate::ai::provider::ProviderConfig;
use crate::analyzer::history::current_year_start;
use crate::analyzer::scanner::FileFilter;
use crate::constants::{backend, report};
use crate::types::{Result, YearError};

/// Flags given on the command line; each overrides the matching config value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub author: Option<String>,
    pub model: Option<String>,
    pub backend: Option<BackendKind>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub style: Option<String>,
    pub include: Option<String>,
    pub exclude: Option<String>,
    pub output: Option<PathBuf>,
}

/// Inputs of the history scan
#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub project_path: PathBuf,
    pub author: String,
    /// First day of the scanned period
    pub since: NaiveDate,
    pub filter: FileFilter,
    pub artifact_root: PathBuf,
}

/// Immutable settings for one run
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub scan: ScanSettings,
    pub provider: ProviderConfig,
    pub style: SummaryStyle,
    pub output_dir: PathBuf,
}

impl RunSettings {
    /// Merge CLI flags over the loaded config and validate the result.
    ///
    /// `default_author` is consulted only when neither the flags nor the
    /// config name an author.
    pub fn resolve<F>(
        project_path: &Path,
        config: Config,
        overrides: CliOverrides,
        default_author: F,
    ) -> Result<Self>
    where
        F: FnOnce() -> Option<String>,
    {
        let Config {
            scan, llm, summary, ..
        } = config;

        let author = overrides
            .author
            .or(scan.author)
            .filter(|a| !a.trim().is_empty())
            .or_else(default_author)
            .ok_or_else(|| {
                YearError::Config(
                    "No commit author given. Pass --author or set git config user.name"
                        .to_string(),
                )
            })?;

        let include = overrides.include.or(scan.include);
        let exclude = overrides.exclude.or(scan.exclude);
        let filter = FileFilter::new(include.as_deref(), exclude.as_deref())?;

        let backend = overrides.backend.unwrap_or(llm.backend);
        let model = resolve_model(backend, overrides.model.or(llm.model))?;
        let api_key = resolve_api_key(backend, overrides.api_key.or(llm.api_key))?;

        let style_name = overrides.style.unwrap_or(summary.style);
        let style = SummaryStyle::resolve(&style_name);

        let output_dir = overrides
            .output
            .or(summary.output_dir)
            .map(|p| project_path.join(p))
            .unwrap_or_else(|| project_path.join(report::OUTPUT_DIR));

        Ok(Self {
            scan: ScanSettings {
                project_path: project_path.to_path_buf(),
                author,
                since: current_year_start(),
                filter,
                artifact_root: project_path.join(scan.diff_dir),
            },
            provider: ProviderConfig {
                backend,
                model,
                api_key,
                base_url: overrides.base_url.or(llm.base_url),
                timeout_secs: llm.timeout_secs,
                max_tokens: llm.max_tokens,
            },
            style,
            output_dir,
        })
    }
}

fn resolve_model(backend: BackendKind, model: Option<String>) -> Result<String> {
    if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
        return Ok(model);
    }

    let default = match backend {
        BackendKind::Ollama => {
            return Err(YearError::Config(
                "Must provide Ollama model (--model)".to_string(),
            ));
        }
        BackendKind::OpenAi => backend::OPENAI_DEFAULT_MODEL,
        BackendKind::Claude => backend::CLAUDE_DEFAULT_MODEL,
    };
    warn!(
        "No model chosen for {}, using default model {}",
        backend, default
    );
    Ok(default.to_string())
}

fn resolve_api_key(backend: BackendKind, api_key: Option<String>) -> Result<Option<String>> {
    let env_var = match backend {
        // A local Ollama server takes no key
        BackendKind::Ollama => return Ok(api_key),
        BackendKind::OpenAi => backend::OPENAI_API_KEY_ENV,
        BackendKind::Claude => backend::ANTHROPIC_API_KEY_ENV,
    };

    api_key
        .or_else(|| std::env::var(env_var).ok())
        .filter(|k| !k.trim().is_empty())
        .map(Some)
        .ok_or_else(|| {
            YearError::Config(format!(
                "Must provide API key for {} (--api-key or {})",
                backend, env_var
            ))
        })
}
