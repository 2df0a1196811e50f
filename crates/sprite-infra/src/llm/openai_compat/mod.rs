//! OpenAI-compatible completion provider.
//!
//! A single [`OpenAiCompatibleProvider`] serves Groq (the default), OpenAI,
//! and any gateway speaking the chat-completions protocol, via a
//! configurable base URL.
//!
//! Talks to the endpoint with `reqwest` directly so that HTTP status codes
//! and the `retry-after` header reach the responder intact.

pub mod config;
pub mod types;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use secrecy::{ExposeSecret, SecretString};

use sprite_core::llm::provider::LlmProvider;
use sprite_types::llm::{
    Choice, CompletionRequest, CompletionResponse, LlmError, MessageRole, Usage,
};

use self::config::OpenAiCompatConfig;
use self::types::{ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Provider for any OpenAI-compatible chat-completions API.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and only exposed when the
/// `Authorization` header is built. The type does not derive Debug.
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    provider_name: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    /// Create a provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            provider_name: config.provider_name,
            model: config.model,
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Build the wire request from a generic [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref system) = request.system {
            messages.push(ChatMessage {
                role: MessageRole::System.to_string(),
                content: system.clone(),
            });
        }

        messages.extend(request.messages.iter().map(|m| ChatMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        }));

        // Use the model from the request if set, otherwise fall back to config default
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        ChatCompletionRequest {
            model,
            messages,
            frequency_penalty: request.frequency_penalty,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.build_request(request);

        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers());
            let error_body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, retry_after, &error_body));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        Ok(into_completion_response(parsed))
    }
}

/// Convert the wire response, keeping every choice in order.
fn into_completion_response(parsed: ChatCompletionResponse) -> CompletionResponse {
    let choices = parsed
        .choices
        .into_iter()
        .map(|c| Choice {
            index: c.index,
            text: c.message.and_then(|m| m.content),
            finish_reason: c.finish_reason,
        })
        .collect();

    let usage = parsed
        .usage
        .map(|u| Usage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        })
        .unwrap_or_default();

    CompletionResponse {
        id: parsed.id,
        model: parsed.model,
        choices,
        usage,
    }
}

/// Parse `retry-after` as whole seconds. HTTP-date values are ignored.
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    value
        .parse::<u64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().filter(|s| *s >= 0.0).map(|s| s.ceil() as u64))
}

/// Map a non-success HTTP status to an [`LlmError`].
fn map_status_error(status: StatusCode, retry_after: Option<u64>, body: &str) -> LlmError {
    match status.as_u16() {
        401 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited {
            retry_after_secs: retry_after,
        },
        503 => LlmError::Unavailable {
            retry_after_secs: retry_after,
        },
        code => {
            let message = serde_json::from_str::<ApiErrorBody>(body)
                .map(|b| b.error.describe())
                .unwrap_or_else(|_| body.to_string());
            LlmError::Api {
                status: code,
                message,
            }
        }
    }
}
