//! Context window rendering.
//!
//! Turns are rendered one per line as `### <speaker_id>: <content>`, in the
//! order they were read (newest first), then trimmed from the front to the
//! character budget. A cut therefore lands in the newest turn. The budget
//! counts UTF-16 code units, so characters outside the BMP cost two.

use sprite_types::turn::Turn;

/// Render a single turn as a context line.
pub fn render_turn(turn: &Turn) -> String {
    format!("### {}: {}", turn.speaker_id, turn.content)
}

/// Render `turns` in the given order and keep only the trailing
/// `max_chars` UTF-16 code units of the result.
pub fn render_window(turns: &[Turn], max_chars: usize) -> String {
    let joined = turns
        .iter()
        .map(render_turn)
        .collect::<Vec<_>>()
        .join("\n");

    keep_trailing_chars(joined, max_chars)
}

/// Length of `text` in UTF-16 code units, the unit the character budget
/// is measured in.
pub fn budget_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Keep the trailing `max_chars` UTF-16 code units of `text`.
///
/// The cut is moved forward to the next char boundary, so a surrogate pair
/// is never split and the result may be one unit under budget.
pub fn keep_trailing_chars(text: String, max_chars: usize) -> String {
    let total = budget_len(&text);
    if total <= max_chars {
        return text;
    }

    let mut excess = total - max_chars;
    let mut cut = text.len();
    for (at, ch) in text.char_indices() {
        if excess == 0 {
            cut = at;
            break;
        }
        excess = excess.saturating_sub(ch.len_utf16());
    }

    text[cut..].to_string()
}
