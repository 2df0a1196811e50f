//! Conversation turn types.
//!
//! A [`Turn`] is one stored unit of the shared conversation history. Turns
//! are globally ordered by their store-assigned `id`; the id is only used for
//! ordering and eviction and is never rendered into the context window.

use serde::{Deserialize, Serialize};

/// Default number of most-recent turns retained by the shared context.
pub const DEFAULT_MAX_TURNS: u32 = 50;

/// Default character budget of a rendered context window.
pub const DEFAULT_MAX_CHARS: usize = 4000;

/// One record of a conversational exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Monotonically increasing sequence number assigned by the store.
    pub id: i64,
    /// Opaque identifier of the message author.
    pub speaker_id: String,
    /// What was said. For recorded exchanges this is the user message
    /// immediately followed by the reply text.
    pub content: String,
}

/// Retention and rendering limits for the shared context window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextLimits {
    /// Maximum number of turns kept in the store and rendered per read.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// Maximum length of a rendered window, in UTF-16 code units.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}
