//! Chat-platform event types.
//!
//! A [`MentionEvent`] is the platform-neutral shape of an incoming
//! message-creation event. Adapters (HTTP relay, terminal loop) build these
//! and hand them to the responder.

use serde::{Deserialize, Serialize};

/// Author of an incoming chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Platform identity of the author.
    pub id: String,
    /// Global username.
    pub username: String,
    /// Per-venue nickname, if the author set one.
    #[serde(default)]
    pub nickname: Option<String>,
}

impl Author {
    /// Per-venue nickname when set, otherwise the global username.
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// An incoming message-creation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionEvent {
    /// Platform id of the message, used to scope replies.
    pub message_id: String,
    /// Venue (channel/guild) the message was posted in.
    #[serde(default)]
    pub venue_id: Option<String>,
    pub author: Author,
    /// Raw message text, mention tokens included.
    pub content: String,
    /// Identities the platform reports as mentioned by this message.
    #[serde(default)]
    pub mentioned_ids: Vec<String>,
}

impl MentionEvent {
    /// Whether the platform reports `identity` as mentioned.
    pub fn mentions(&self, identity: &str) -> bool {
        self.mentioned_ids.iter().any(|id| id == identity)
    }
}
