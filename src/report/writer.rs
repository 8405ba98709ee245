use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use tracing::info;

use crate::constants::report;
use crate::types::{IoResultExt, Result};

/// Writes `prompt-<ts>.txt` and `summary-<ts>.md` into the output directory.
///
/// The timestamp is taken once, so both files of a run share it.
pub struct SummaryWriter {
    output_dir: PathBuf,
    stamp: String,
}

impl SummaryWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self::with_timestamp(output_dir, Local::now())
    }

    pub fn with_timestamp<Tz: TimeZone>(output_dir: impl AsRef<Path>, at: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            stamp: at.format(report::TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn write_prompt(&self, prompt: &str) -> Result<PathBuf> {
        self.write(report::PROMPT_PREFIX, "txt", prompt)
    }

    pub fn write_summary(&self, summary: &str) -> Result<PathBuf> {
        self.write(report::SUMMARY_PREFIX, "md", summary)
    }

    fn write(&self, prefix: &str, extension: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).with_path(&self.output_dir)?;

        let path = self
            .output_dir
            .join(format!("{}{}.{}", prefix, self.stamp, extension));
        fs::write(&path, content).with_path(&path)?;

        info!("Wrote {}", path.display());
        Ok(path)
    }
}
