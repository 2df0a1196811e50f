//! Outbound replies.
//!
//! `ReplySink` is the port a chat adapter implements to answer the message
//! that started a cycle. The fixed reply wording lives here too.

use sprite_types::error::ReplyError;

/// Sent in place of a completion that produced no text.
pub const APOLOGY_REPLY: &str = "I'm so sorry! I couldn't understand that.";

/// Sent after every failed completion request.
pub const SLEEPY_REPLY: &str = "I'm feeling so sleepy....Try again later.";

/// Reply for an unavailable (HTTP 503) completion service.
pub fn unavailable_reply(retry_after_secs: Option<u64>) -> String {
    let wait = retry_after_secs
        .map(|secs| secs.to_string())
        .unwrap_or_else(|| "a few".to_string());
    format!("The service is currently unavailable. Please try again in {wait} seconds.")
}

/// Sends replies scoped to the originating message.
pub trait ReplySink: Send + Sync {
    fn send_reply(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), ReplyError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_reply_quotes_retry_after() {
        assert_eq!(
            unavailable_reply(Some(30)),
            "The service is currently unavailable. Please try again in 30 seconds."
        );
    }

    #[test]
    fn test_unavailable_reply_without_hint() {
        assert!(unavailable_reply(None).ends_with("in a few seconds."));
    }
}
