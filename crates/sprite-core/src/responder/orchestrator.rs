//! ResponseOrchestrator -- one request/response cycle per mention.
//!
//! Sequence: filter -> extract -> fetch context -> compose & invoke ->
//! reply & record. Failure policy is asymmetric on purpose:
//! - a context read failure drops the message with no reply;
//! - a completion failure sends failure replies and records nothing;
//! - an append failure is logged and the reply already sent stands.
//!
//! Nothing is retried. Concurrent cycles are not serialized, so two cycles
//! may both read the context before either appends.

use std::sync::Arc;

use tracing::{Instrument, error, info, info_span, warn};

use sprite_types::chat::MentionEvent;

use crate::context::repository::ContextRepository;
use crate::context::store::ContextStore;
use crate::context::window::budget_len;
use crate::llm::box_provider::BoxLlmProvider;

use super::mention::strip_self_mention;
use super::prompt::{PromptTemplate, build_request};
use super::reply::{APOLOGY_REPLY, ReplySink, SLEEPY_REPLY, unavailable_reply};

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The message did not mention this bot.
    Ignored,
    /// The shared context could not be read; no reply was sent.
    ContextUnavailable,
    /// A reply was sent. `recorded` is false when the append failed.
    Replied { reply: String, recorded: bool },
    /// The completion service failed; failure replies were sent.
    CompletionFailed { status: Option<u16> },
}

impl CycleOutcome {
    /// Short machine-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CycleOutcome::Ignored => "ignored",
            CycleOutcome::ContextUnavailable => "context_unavailable",
            CycleOutcome::Replied { .. } => "replied",
            CycleOutcome::CompletionFailed { .. } => "completion_failed",
        }
    }
}

/// Sequences one request/response cycle against the shared context.
pub struct ResponseOrchestrator<R: ContextRepository> {
    bot_id: String,
    model: String,
    prompt: PromptTemplate,
    store: Arc<ContextStore<R>>,
    provider: BoxLlmProvider,
}

impl<R: ContextRepository + 'static> ResponseOrchestrator<R> {
    pub fn new(
        bot_id: impl Into<String>,
        model: impl Into<String>,
        prompt: PromptTemplate,
        store: Arc<ContextStore<R>>,
        provider: BoxLlmProvider,
    ) -> Self {
        Self {
            bot_id: bot_id.into(),
            model: model.into(),
            prompt,
            store,
            provider,
        }
    }

    /// This bot's own platform identity.
    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn store(&self) -> &Arc<ContextStore<R>> {
        &self.store
    }

    /// Run one cycle for `event`, answering through `sink`.
    pub async fn handle_event<S: ReplySink>(&self, event: &MentionEvent, sink: &S) -> CycleOutcome {
        if !event.mentions(&self.bot_id) {
            return CycleOutcome::Ignored;
        }

        let user_id = event.author.id.as_str();
        let user_message = strip_self_mention(&event.content, &self.bot_id);

        let span = info_span!(
            "sprite.respond",
            message_id = %event.message_id,
            venue_id = ?event.venue_id,
            user_id = %user_id,
            display_name = %event.author.display_name(),
        );

        self.respond(user_id, &user_message, sink)
            .instrument(span)
            .await
    }

    async fn respond<S: ReplySink>(
        &self,
        user_id: &str,
        user_message: &str,
        sink: &S,
    ) -> CycleOutcome {
        let context = match self.store.read_context().await {
            Ok(context) => context,
            Err(e) => {
                error!(error = %e, "failed to read shared context, dropping message");
                return CycleOutcome::ContextUnavailable;
            }
        };

        let system = self.prompt.render(&context, user_id);
        let request = build_request(&self.model, system, user_message);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.frequency_penalty = ?request.frequency_penalty,
            context_units = budget_len(&context),
        );

        match self.provider.complete(&request).instrument(span).await {
            Ok(response) => {
                let reply = match response.first_text() {
                    Some(text) => text.to_string(),
                    None => {
                        warn!(response_id = %response.id, "completion had no text, sending apology");
                        APOLOGY_REPLY.to_string()
                    }
                };

                info!(
                    response_id = %response.id,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "completion received"
                );

                send(sink, &reply).await;

                let recorded = match self
                    .store
                    .append_turn(user_id, &format!("{user_message}{reply}"))
                    .await
                {
                    Ok(()) => true,
                    Err(e) => {
                        error!(error = %e, "failed to record turn in shared context");
                        false
                    }
                };

                CycleOutcome::Replied { reply, recorded }
            }
            Err(e) => {
                let status = e.status();
                error!(error = %e, status = ?status, "completion request failed");

                if status == Some(503) {
                    send(sink, &unavailable_reply(e.retry_after_secs())).await;
                }
                send(sink, SLEEPY_REPLY).await;

                CycleOutcome::CompletionFailed { status }
            }
        }
    }
}

/// Deliver one reply; delivery failures are logged only.
async fn send<S: ReplySink>(sink: &S, text: &str) {
    if let Err(e) = sink.send_reply(text).await {
        warn!(error = %e, "failed to deliver reply");
    }
}
