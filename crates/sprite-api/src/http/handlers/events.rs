//! Message event relay.
//!
//! POST /api/v1/events/message - Run one response cycle for a message event
//! forwarded by a chat-platform gateway.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tokio::sync::Mutex;

use sprite_core::responder::orchestrator::CycleOutcome;
use sprite_core::responder::reply::ReplySink;
use sprite_types::chat::MentionEvent;
use sprite_types::error::ReplyError;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Result of one cycle, including every reply the bot sent.
#[derive(Debug, Serialize)]
pub struct EventResult {
    pub outcome: &'static str,
    pub replies: Vec<String>,
    /// Whether the exchange was appended to the shared context.
    pub recorded: bool,
    /// Completion-service HTTP status, when the completion failed with one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl EventResult {
    fn new(outcome: &CycleOutcome, replies: Vec<String>) -> Self {
        let (recorded, status) = match outcome {
            CycleOutcome::Replied { recorded, .. } => (*recorded, None),
            CycleOutcome::CompletionFailed { status } => (false, *status),
            CycleOutcome::Ignored | CycleOutcome::ContextUnavailable => (false, None),
        };
        Self {
            outcome: outcome.label(),
            replies,
            recorded,
            status,
        }
    }
}

/// Collects replies so they can be returned in the HTTP response.
#[derive(Default)]
pub struct CollectedReplies {
    replies: Mutex<Vec<String>>,
}

impl CollectedReplies {
    pub async fn into_inner(self) -> Vec<String> {
        self.replies.into_inner()
    }
}

impl ReplySink for CollectedReplies {
    async fn send_reply(&self, text: &str) -> Result<(), ReplyError> {
        self.replies.lock().await.push(text.to_string());
        Ok(())
    }
}

/// POST /api/v1/events/message
pub async fn handle_message(
    State(state): State<AppState>,
    Json(event): Json<MentionEvent>,
) -> Result<Json<ApiResponse<EventResult>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let responder = state
        .responder
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured("responder is not configured".to_string()))?;

    // Unmentioned events are ignored whatever their shape.
    if event.mentions(responder.bot_id()) && event.author.id.trim().is_empty() {
        return Err(AppError::Validation("author.id must not be empty".to_string()));
    }

    tracing::debug!(
        request_id = %request_id,
        message_id = %event.message_id,
        "message event received"
    );

    let sink = CollectedReplies::default();
    let outcome = responder.handle_event(&event, &sink).await;
    let replies = sink.into_inner().await;

    let data = EventResult::new(&outcome, replies);
    Ok(Json(ApiResponse::success(data, request_id, start)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mention_event_deserializes_with_defaults() {
        let body = r#"{
            "message_id": "m1",
            "author": {"id": "1001", "username": "alice"},
            "content": "<@42> hi"
        }"#;
        let event: MentionEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.author.display_name(), "alice");
        assert!(event.venue_id.is_none());
        assert!(event.mentioned_ids.is_empty());
    }

    #[test]
    fn event_result_serializes_outcome_fields() {
        let outcome = CycleOutcome::CompletionFailed { status: Some(503) };
        let result = EventResult::new(&outcome, vec!["a".into(), "b".into()]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "completion_failed");
        assert_eq!(json["status"], 503);
        assert_eq!(json["recorded"], false);
        assert_eq!(json["replies"].as_array().unwrap().len(), 2);

        let outcome = CycleOutcome::Replied {
            reply: "hello!".into(),
            recorded: true,
        };
        let json = serde_json::to_value(EventResult::new(&outcome, vec!["hello!".into()])).unwrap();
        assert_eq!(json["recorded"], true);
        assert!(json.get("status").is_none());
    }

    #[tokio::test]
    async fn collected_replies_keep_order() {
        let sink = CollectedReplies::default();
        sink.send_reply("first").await.unwrap();
        sink.send_reply("second").await.unwrap();
        assert_eq!(sink.into_inner().await, vec!["first", "second"]);
    }
}
