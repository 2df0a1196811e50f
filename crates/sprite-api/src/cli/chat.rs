//! Terminal venue: a local chat loop where every line mentions the bot.
//!
//! Lines are wrapped into [`MentionEvent`]s and run through the same
//! responder the REST relay uses, so terminal exchanges land in the shared
//! context alongside everyone else's.

use std::io::Write;
use std::sync::Mutex;

use anyhow::Result;
use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

use sprite_core::responder::mention::mention_token;
use sprite_core::responder::orchestrator::CycleOutcome;
use sprite_core::responder::reply::ReplySink;
use sprite_types::chat::{Author, MentionEvent};
use sprite_types::error::ReplyError;

use crate::state::AppState;

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a line.
    Message(String),
    /// Ctrl+D.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

/// Async line input wrapping `rustyline_async`.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Returns the input handler and a writer that prints above the prompt.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }

    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let trimmed = line.trim().to_string();
                if !trimmed.is_empty() {
                    self.rl.add_history_entry(trimmed.clone());
                }
                InputEvent::Message(trimmed)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(_) => InputEvent::Eof,
        }
    }

    /// Restore the terminal.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}

/// Prints replies to the terminal under the bot's name.
pub struct TerminalSink {
    writer: Mutex<SharedWriter>,
    label: String,
}

impl TerminalSink {
    pub fn new(writer: SharedWriter, label: impl Into<String>) -> Self {
        Self {
            writer: Mutex::new(writer),
            label: label.into(),
        }
    }
}

impl ReplySink for TerminalSink {
    async fn send_reply(&self, text: &str) -> Result<(), ReplyError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ReplyError::Delivery("terminal writer poisoned".to_string()))?;
        writeln!(writer, "{} {}", style(format!("{}:", self.label)).magenta().bold(), text)
            .map_err(|e| ReplyError::Delivery(e.to_string()))
    }
}

/// Wrap a terminal line as a message that mentions `bot_id`.
pub fn terminal_event(bot_id: &str, author: &Author, line: &str) -> MentionEvent {
    MentionEvent {
        message_id: uuid::Uuid::now_v7().to_string(),
        venue_id: Some("terminal".to_string()),
        author: author.clone(),
        content: format!("{} {line}", mention_token(bot_id)),
        mentioned_ids: vec![bot_id.to_string()],
    }
}

/// Run the interactive loop until Ctrl+D, Ctrl+C, or `/quit`.
pub async fn run_chat(state: &AppState, user_id: String, name: Option<String>) -> Result<()> {
    let responder = state
        .responder
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("responder is not configured"))?;

    let author = Author {
        username: name.clone().unwrap_or_else(|| user_id.clone()),
        id: user_id,
        nickname: name,
    };

    println!();
    println!("  {} {}", style("*").magenta(), style("Sprite").magenta().bold());
    println!(
        "  {}  {}",
        style("Model:").bold(),
        style(responder.model()).dim()
    );
    println!(
        "  {}  {}",
        style("Speaking as:").bold(),
        style(author.display_name()).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /context to view the shared context, /quit or Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();

    let prompt = format!("{} ", style(format!("{}>", author.display_name())).cyan().bold());
    let (mut input, writer) = ChatInput::new(prompt)?;
    let mut out = writer.clone();
    let sink = TerminalSink::new(writer, "Sprite");

    loop {
        match input.read_line().await {
            InputEvent::Eof | InputEvent::Interrupted => break,
            InputEvent::Message(text) => match text.as_str() {
                "" => continue,
                "/quit" | "/exit" => break,
                "/context" => {
                    let context = state.store.read_context().await?;
                    if context.is_empty() {
                        writeln!(out, "{}", style("(empty)").dim())?;
                    } else {
                        writeln!(out, "{}", style(context).dim())?;
                    }
                }
                _ => {
                    let event = terminal_event(responder.bot_id(), &author, &text);
                    let outcome = responder.handle_event(&event, &sink).await;
                    match outcome {
                        CycleOutcome::ContextUnavailable => {
                            writeln!(
                                out,
                                "{}",
                                style("shared context unavailable, message dropped").red()
                            )?;
                        }
                        CycleOutcome::Replied {
                            recorded: false, ..
                        } => {
                            writeln!(out, "{}", style("(reply not recorded)").yellow())?;
                        }
                        _ => {}
                    }
                }
            },
        }
    }

    input.flush();
    state.store.flush().await;
    println!("\n  {}", style("Bye!").dim());
    Ok(())
}
