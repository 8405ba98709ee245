//! AI Integration Layer
//!
//! Prompt assembly, backend adapters and the summary call.

pub mod prompt;
pub mod provider;
pub mod summarize;

pub use prompt::{AssembledPrompt, PromptAssembler, SummaryStyle};
pub use provider::{
    ClaudeProvider, LlmProvider, LlmResponse, OllamaProvider, OpenAiProvider, ProviderConfig,
    ResponseTiming, SharedProvider, TokenUsage, create_provider,
};
pub use summarize::generate_summary;
