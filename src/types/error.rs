//! Unified Error Type System
//!
//! Centralized error type for the entire application.
//!
//! ## Error Classes
//!
//! - **Config**: missing model/API key, bad filters; fatal before any work starts
//! - **Git**: a version-control query failed; captured per file by the scanner
//! - **Filesystem**: directory or file write failed; fatal, names the path
//! - **Backend**: the AI service call failed; fatal, names the backend
//!
//! Provider internals raise `LlmApi`; the summarize step wraps every provider
//! failure into `Backend` so the caller sees one uniform shape.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pipeline::PipelineStage;

#[derive(Debug, Error)]
pub enum YearError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("git {command} failed: {message}")]
    Git { command: String, message: String },

    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid artifact {path}: {message}")]
    Artifact { path: PathBuf, message: String },

    // -------------------------------------------------------------------------
    // LLM Errors
    // -------------------------------------------------------------------------
    /// Raw provider failure; wrapped into `Backend` before leaving the adapter
    #[error("LLM API error: {0}")]
    LlmApi(String),

    #[error("AI service [{backend}] call failed: {message}")]
    Backend { backend: String, message: String },

    // -------------------------------------------------------------------------
    // Pipeline Errors
    // -------------------------------------------------------------------------
    #[error("Pipeline error in stage {stage}: {message}")]
    Pipeline {
        stage: PipelineStage,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, YearError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl YearError {
    /// Create a git command error
    pub fn git(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Git {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a filesystem error for the given path
    pub fn filesystem(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap any failure from a backend into the uniform backend error
    pub fn backend(backend: impl Into<String>, err: YearError) -> Self {
        let message = match err {
            // Avoid double prefixes when a provider already produced a backend error
            Self::Backend { message, .. } => message,
            Self::LlmApi(message) => message,
            other => other.to_string(),
        };
        Self::Backend {
            backend: backend.into(),
            message,
        }
    }

    /// Check if this error is a configuration problem detected before work began
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Context extension trait for filesystem results
pub trait IoResultExt<T> {
    /// Attach the offending path to an I/O error
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| YearError::filesystem(path, e))
    }
}

// =============================================================================
// Tests
// =============================================================================
