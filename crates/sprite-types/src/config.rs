//! Configuration types for Sprite.
//!
//! `SpriteConfig` represents the top-level `config.toml` that names the
//! bot's platform identity, the completion model and endpoint, the persona
//! template, and the shared context limits.

use serde::{Deserialize, Serialize};

use crate::turn::ContextLimits;

/// Default completion model.
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Default OpenAI-compatible endpoint (Groq).
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default environment variable holding the completion-service API key.
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Top-level configuration for the responder.
///
/// Loaded from `~/.sprite/config.toml`. All fields have defaults except
/// `bot_id`, which is empty until configured (startup validates it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteConfig {
    /// This bot's own platform identity, used for mention filtering.
    #[serde(default)]
    pub bot_id: String,

    /// Completion model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible completion endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable that holds the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Persona template override. Supports `{context}` and `{user_id}`.
    #[serde(default)]
    pub persona: Option<String>,

    /// HTTP timeout for completion requests.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Shared context retention and rendering limits.
    #[serde(default)]
    pub context: ContextLimits,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            bot_id: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            persona: None,
            request_timeout_secs: default_request_timeout_secs(),
            context: ContextLimits::default(),
        }
    }
}
