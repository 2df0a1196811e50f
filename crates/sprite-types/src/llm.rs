//! LLM request/response types for Sprite.
//!
//! These types model the data shapes for completion-service interactions:
//! completion requests, ordered response choices, usage tracking, and the
//! error taxonomy surfaced to the responder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Convenience constructor for a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Request to a completion service.
///
/// History is never passed as native multi-turn messages: it arrives
/// pre-flattened inside `system`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// One generated alternative in a completion response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    /// Generated text; absent when the service returned no content.
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Response from a completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub model: String,
    /// Ordered list of choices, as returned by the service.
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

impl CompletionResponse {
    /// Text of the first choice, if present and non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.text.as_deref())
            .filter(|t| !t.is_empty())
    }
}

/// Token usage for a completion request/response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from completion-service operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// HTTP 503. `retry_after_secs` comes from the `retry-after` header.
    #[error("service unavailable (retry after {retry_after_secs:?}s)")]
    Unavailable { retry_after_secs: Option<u64> },

    #[error("rate limited (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl LlmError {
    /// HTTP status code carried by this error, when one is known.
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Unavailable { .. } => Some(503),
            LlmError::RateLimited { .. } => Some(429),
            LlmError::AuthenticationFailed => Some(401),
            LlmError::Api { status, .. } => Some(*status),
            LlmError::Transport(_) | LlmError::Deserialization(_) | LlmError::InvalidRequest(_) => {
                None
            }
        }
    }

    /// Retry-after hint in seconds, when the service provided one.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            LlmError::Unavailable { retry_after_secs }
            | LlmError::RateLimited { retry_after_secs } => *retry_after_secs,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_display_matches_wire_name() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let wire = serde_json::to_value(&role).unwrap();
            assert_eq!(wire, serde_json::Value::String(role.to_string()));
        }
    }

    #[test]
    fn test_first_text_picks_first_choice() {
        let resp = CompletionResponse {
            id: "r1".into(),
            model: "m".into(),
            choices: vec![
                Choice {
                    index: 0,
                    text: Some("first".into()),
                    finish_reason: None,
                },
                Choice {
                    index: 1,
                    text: Some("second".into()),
                    finish_reason: None,
                },
            ],
            usage: Usage::default(),
        };
        assert_eq!(resp.first_text(), Some("first"));
    }

    #[test]
    fn test_first_text_absent_or_empty() {
        let mut resp = CompletionResponse {
            id: "r1".into(),
            model: "m".into(),
            choices: Vec::new(),
            usage: Usage::default(),
        };
        assert_eq!(resp.first_text(), None);

        resp.choices.push(Choice::default());
        assert_eq!(resp.first_text(), None);

        resp.choices[0].text = Some(String::new());
        assert_eq!(resp.first_text(), None);
    }

    #[test]
    fn test_llm_error_status() {
        let err = LlmError::Unavailable {
            retry_after_secs: Some(30),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.retry_after_secs(), Some(30));

        let err = LlmError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.retry_after_secs(), None);

        assert_eq!(LlmError::Transport("reset".into()).status(), None);
    }

    #[test]
    fn test_request_skips_absent_options() {
        let req = CompletionRequest {
            model: "llama3-70b-8192".into(),
            messages: vec![Message::user("hi")],
            system: None,
            frequency_penalty: Some(1.2),
            max_tokens: None,
            temperature: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("system").is_none());
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["frequency_penalty"], serde_json::json!(1.2));
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
