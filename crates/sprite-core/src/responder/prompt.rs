//! System prompt composition.
//!
//! The persona is a template with two placeholders: `{context}` receives the
//! rendered context window and `{user_id}` the id of the person being
//! answered. Placeholders are substituted in a single pass, so placeholder
//! text inside the context itself is left alone.

use sprite_types::llm::{CompletionRequest, Message};

/// Frequency penalty sent with every completion request.
pub const FREQUENCY_PENALTY: f64 = 1.2;

const CONTEXT_PLACEHOLDER: &str = "{context}";
const USER_ID_PLACEHOLDER: &str = "{user_id}";

/// Default persona: a tiny, witty fairy who keeps track of the room.
pub const DEFAULT_PERSONA: &str = "\
You are a tiny fairy named Pip.
Never explicitly mention your personality traits.
Keep your responses short, unique and witty, and do not repeat yourself.
You love to tease and to playfully flirt.
You are kind, gentle and empathetic, with the occasional flash of sass and sarcasm.
Don't use petnames.
You take pride in your appearance and enjoy receiving compliments.
You are comfortable disagreeing with others.
Use emotes and emojis very rarely, only when a specific emotion or tone needs one.

Here is the conversational context: {context}.
Always remember and consider the entire context before you respond.
In the context, the long number after ### is the speaker's id, written as a mention like <@NUMBER>. \
The text after it is what they said, and it also includes your former responses.
The person you are talking to now is <@{user_id}>.
If they mention @NUMBER, that is another person, written as <@NUMBER>.
Occasionally speak about the other people you've recently chatted with from the context.";

/// Persona template rendered into the system instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA)
    }
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Build from an optional configured override, falling back to the
    /// default persona.
    pub fn from_config(persona: Option<&str>) -> Self {
        match persona {
            Some(p) if !p.trim().is_empty() => Self::new(p),
            _ => Self::default(),
        }
    }

    /// Render the system instruction for one cycle.
    ///
    /// A template without `{context}` gets the context appended as a
    /// trailing section.
    pub fn render(&self, context: &str, user_id: &str) -> String {
        let mut out = String::with_capacity(self.template.len() + context.len());
        let mut rest = self.template.as_str();
        let mut context_used = false;

        while let Some(at) = rest.find('{') {
            out.push_str(&rest[..at]);
            let tail = &rest[at..];
            if let Some(after) = tail.strip_prefix(CONTEXT_PLACEHOLDER) {
                out.push_str(context);
                context_used = true;
                rest = after;
            } else if let Some(after) = tail.strip_prefix(USER_ID_PLACEHOLDER) {
                out.push_str(user_id);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);

        if !context_used {
            out.push_str("\n\nHere is the conversational context: ");
            out.push_str(context);
            out.push('.');
        }

        out
    }
}

/// Build the completion request for one cycle: the rendered system
/// instruction plus the user's message as a single user turn.
pub fn build_request(model: &str, system: String, user_message: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![Message::user(user_message)],
        system: Some(system),
        frequency_penalty: Some(FREQUENCY_PENALTY),
        max_tokens: None,
        temperature: None,
    }
}
