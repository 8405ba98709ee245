//! Global Constants
//!
//! Centralized constants for defaults and on-disk layout.

/// On-disk artifact layout
pub mod artifacts {
    /// Artifact root, relative to the project path
    pub const ROOT_DIR: &str = "file_diff";

    /// Suffix appended to every mirrored directory name
    pub const DIR_SUFFIX: &str = "_diff";

    /// Suffix replacing a source file's extension
    pub const FILE_SUFFIX: &str = "_diff.json";
}

/// Report output
pub mod report {
    /// Default output directory, relative to the project path
    pub const OUTPUT_DIR: &str = "report";

    /// Timestamp used in prompt and summary file names
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

    pub const PROMPT_PREFIX: &str = "prompt-";
    pub const SUMMARY_PREFIX: &str = "summary-";
}

/// Backend defaults
pub mod backend {
    pub const OLLAMA_API_BASE: &str = "http://localhost:11434";
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
    pub const CLAUDE_API_BASE: &str = "https://api.anthropic.com";

    pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";
    pub const CLAUDE_DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

    /// Anthropic API version header value
    pub const ANTHROPIC_VERSION: &str = "2023-06-01";

    /// User turn that triggers generation when the prompt is sent as the system field
    pub const CLAUDE_TRIGGER_MESSAGE: &str = "Generate the review now.";

    pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
    pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
}

/// HTTP/Network constants
pub mod network {
    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

    /// Default completion length for backends that require one
    pub const DEFAULT_MAX_TOKENS: usize = 4096;
}
