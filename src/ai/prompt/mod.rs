//! Prompt Assembly
//!
//! Loads the artifacts a scan wrote, serializes them as one array and
//! substitutes it into the style template.

mod templates;

pub use templates::CONTEXT_PLACEHOLDER;

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::types::{FileSummaryArtifact, IoResultExt, Result, YearError};

// =============================================================================
// Summary Style
// =============================================================================

/// Tone of the generated narrative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryStyle {
    #[default]
    Crazy,
    Encourage,
}

impl SummaryStyle {
    /// Map a style name to a style, falling back to `Crazy` with a warning
    pub fn resolve(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "crazy" => SummaryStyle::Crazy,
            "encourage" => SummaryStyle::Encourage,
            other => {
                warn!(
                    "Unsupported summary style: {}, using default style: crazy",
                    other
                );
                SummaryStyle::Crazy
            }
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            SummaryStyle::Crazy => templates::CRAZY,
            SummaryStyle::Encourage => templates::ENCOURAGE,
        }
    }
}

impl std::fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryStyle::Crazy => write!(f, "crazy"),
            SummaryStyle::Encourage => write!(f, "encourage"),
        }
    }
}

// =============================================================================
// Prompt Assembler
// =============================================================================

/// Final prompt plus the number of artifacts it embeds
#[derive(Debug, Clone)]
pub struct AssembledPrompt {
    pub text: String,
    pub artifact_count: usize,
}

pub struct PromptAssembler {
    artifacts: Vec<PathBuf>,
    style: SummaryStyle,
}

impl PromptAssembler {
    /// Assembler over the given artifact files, embedded in path order
    pub fn new(artifacts: &[PathBuf], style: SummaryStyle) -> Self {
        let mut artifacts = artifacts.to_vec();
        artifacts.sort();
        artifacts.dedup();
        Self { artifacts, style }
    }

    /// Build the prompt from the artifact files
    pub fn assemble(&self) -> Result<AssembledPrompt> {
        let artifacts = self.load_artifacts()?;
        let text = render(self.style, &artifacts)?;
        debug!(
            "Assembled {} prompt from {} artifacts ({} chars)",
            self.style,
            artifacts.len(),
            text.len()
        );
        Ok(AssembledPrompt {
            text,
            artifact_count: artifacts.len(),
        })
    }

    /// Parse each artifact file, ordered by path
    pub fn load_artifacts(&self) -> Result<Vec<FileSummaryArtifact>> {
        self.artifacts
            .iter()
            .map(|path| {
                let content = fs::read_to_string(path).with_path(path)?;
                serde_json::from_str(&content).map_err(|e| YearError::Artifact {
                    path: path.clone(),
                    message: e.to_string(),
                })
            })
            .collect()
    }
}

/// Substitute the serialized artifacts into the style template
pub fn render(style: SummaryStyle, artifacts: &[FileSummaryArtifact]) -> Result<String> {
    let ctx = serde_json::to_string_pretty(artifacts)?;
    Ok(style.template().replacen(CONTEXT_PLACEHOLDER, &ctx, 1))
}
