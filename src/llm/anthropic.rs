use serde::{Deserialize, Serialize};

use super::{Completion, LanguageModel, LlmError};
use crate::conversation::Turn;
use crate::http::endpoint;

const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Turn],
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// Pull the first text block out of a Messages API response body.
fn primary_text(body: &str) -> Result<String, LlmError> {
    let response: MessagesResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Decode(e.to_string()))?;
    response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .find_map(|block| block.text)
        .ok_or(LlmError::EmptyReply)
}

impl AnthropicClient {
    pub fn new(http: reqwest::Client, api_key: &str, base_url: &str, model: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl LanguageModel for AnthropicClient {
    async fn generate(
        &self,
        system: &str,
        messages: &[Turn],
        max_output_tokens: u32,
    ) -> Result<Completion, LlmError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: max_output_tokens,
            system,
            messages,
        };
        tracing::debug!(
            model = %self.model,
            turns = messages.len(),
            max_tokens = max_output_tokens,
            "anthropic messages call"
        );

        let response = self
            .http
            .post(endpoint(&self.base_url, "v1/messages"))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(LlmError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(LlmError::Request)?;
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = primary_text(&body)?;
        tracing::info!(chars = text.len(), "anthropic reply received");
        Ok(Completion { text })
    }
}
