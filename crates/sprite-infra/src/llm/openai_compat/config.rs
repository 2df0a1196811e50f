//! Configuration and per-provider defaults for OpenAI-compatible providers.
//!
//! [`groq_defaults`] is the starting point; `with_base_url` retargets it at
//! any other service speaking the OpenAI chat-completions protocol.

use std::time::Duration;

use secrecy::SecretString;

use sprite_types::config::DEFAULT_BASE_URL;

/// Configuration for an OpenAI-compatible completion provider.
///
/// Does NOT derive Debug: it holds the API key.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "groq", "openai").
    pub provider_name: String,
    /// Base URL for the API, without the `/chat/completions` suffix.
    pub base_url: String,
    /// API key for bearer authentication.
    pub api_key: SecretString,
    /// Model identifier used when a request leaves `model` empty.
    pub model: String,
    /// Whole-request HTTP timeout.
    pub timeout: Duration,
}

impl OpenAiCompatConfig {
    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point at another OpenAI-compatible endpoint. The provider name
    /// follows the URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.provider_name = provider_name_for(&self.base_url).to_string();
        self
    }
}

/// Groq default configuration.
///
/// Base URL: `https://api.groq.com/openai/v1`
pub fn groq_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "groq".into(),
        base_url: DEFAULT_BASE_URL.into(),
        api_key,
        model: model.into(),
        timeout: Duration::from_secs(120),
    }
}

/// Pick a provider name from a base URL, for logging.
pub fn provider_name_for(base_url: &str) -> &'static str {
    if base_url.contains("groq.com") {
        "groq"
    } else if base_url.contains("openai.com") {
        "openai"
    } else {
        "openai_compatible"
    }
}
