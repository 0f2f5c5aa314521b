//! Language-model capability consumed by the research step.
use crate::conversation::Turn;

mod anthropic;

pub use anthropic::AnthropicClient;

/// The part of a model reply we care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
}

#[derive(Debug)]
pub enum LlmError {
    Request(reqwest::Error),
    Status { status: u16, body: String },
    Decode(String),
    EmptyReply,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::Request(e) => write!(f, "model request failed: {e}"),
            LlmError::Status { status, body } => write!(f, "model API answered {status}: {body}"),
            LlmError::Decode(e) => write!(f, "could not decode model reply: {e}"),
            LlmError::EmptyReply => write!(f, "model reply contained no text"),
        }
    }
}

impl std::error::Error for LlmError {}

/// Single-shot completion over a running conversation.
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(
        &self,
        system: &str,
        messages: &[Turn],
        max_output_tokens: u32,
    ) -> Result<Completion, LlmError>;
}
