//! Mention token handling.
//!
//! Platforms address a user with `<@ID>`. Only the first self-mention is
//! stripped from the message; other forms such as `<@!ID>` are kept as
//! text.

/// The canonical mention token for `id`.
pub fn mention_token(id: &str) -> String {
    format!("<@{id}>")
}

/// Remove the first self-mention of `bot_id` from `content` and trim the
/// surrounding whitespace.
pub fn strip_self_mention(content: &str, bot_id: &str) -> String {
    let token = mention_token(bot_id);

    match content.find(&token) {
        Some(at) => format!("{}{}", &content[..at], &content[at + token.len()..])
            .trim()
            .to_string(),
        None => content.trim().to_string(),
    }
}
