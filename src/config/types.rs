//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/code-year-summary/) and project-level files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{artifacts, network};
use crate::types::{Result, YearError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// History scan settings
    pub scan: ScanConfig,

    /// AI backend settings
    pub llm: LlmConfig,

    /// Summary output settings
    pub summary: SummaryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            scan: ScanConfig::default(),
            llm: LlmConfig::default(),
            summary: SummaryConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if self.llm.timeout_secs == 0 {
            return Err(YearError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(YearError::Config(
                "LLM max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.scan.diff_dir.as_os_str().is_empty() {
            return Err(YearError::Config(
                "scan.diff_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Scan Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Commit author (defaults to `git config user.name`)
    pub author: Option<String>,

    /// Regular expression a tracked path must match
    pub include: Option<String>,

    /// Regular expression that removes a tracked path
    pub exclude: Option<String>,

    /// Artifact directory, relative to the project path
    pub diff_dir: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            author: None,
            include: None,
            exclude: None,
            diff_dir: PathBuf::from(artifacts::ROOT_DIR),
        }
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

/// Supported text-completion backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local Ollama server
    #[default]
    Ollama,
    /// OpenAI-compatible chat completions
    OpenAi,
    /// Anthropic-compatible messages API
    Claude,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Ollama => "ollama",
            BackendKind::OpenAi => "openai",
            BackendKind::Claude => "claude",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(BackendKind::Ollama),
            "openai" => Ok(BackendKind::OpenAi),
            "claude" => Ok(BackendKind::Claude),
            _ => Err(format!(
                "Unsupported AI service type: {}. Valid values: ollama, openai, claude",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Backend type
    pub backend: BackendKind,

    /// Model name (required for ollama)
    pub model: Option<String>,

    /// API key; never serialized to output
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Custom API base URL
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens to generate (sent to backends that require it)
    pub max_tokens: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Ollama,
            model: None,
            api_key: None,
            base_url: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            max_tokens: network::DEFAULT_MAX_TOKENS,
        }
    }
}

// =============================================================================
// Summary Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Prompt style: crazy, encourage
    pub style: String,

    /// Output directory (defaults to <project>/report)
    pub output_dir: Option<PathBuf>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            style: "crazy".to_string(),
            output_dir: None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.backend, BackendKind::Ollama);
        assert_eq!(config.summary.style, "crazy");
        assert_eq!(config.scan.diff_dir, PathBuf::from("file_diff"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_kind() {
        assert_eq!(BackendKind::OpenAi.to_string(), "openai");
        assert_eq!("Claude".parse::<BackendKind>().unwrap(), BackendKind::Claude);
        assert!("gemini".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_backend_kind_serde() {
        let json = serde_json::to_string(&BackendKind::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");
        let parsed: BackendKind = serde_json::from_str("\"claude\"").unwrap();
        assert_eq!(parsed, BackendKind::Claude);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.llm.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-secret".into());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
