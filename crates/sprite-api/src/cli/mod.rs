//! CLI command definitions for the `sprite` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod context;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// A chat responder with a shared, bounded conversational memory.
#[derive(Parser)]
#[command(name = "sprite", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST relay for incoming message events.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Talk to the bot from the terminal. Every line mentions the bot.
    Chat {
        /// Speaker identity recorded in the shared context.
        #[arg(long, default_value = "local")]
        user_id: String,

        /// Display name shown in the prompt.
        #[arg(long)]
        name: Option<String>,
    },

    /// Inspect the shared context.
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ContextAction {
    /// Print the rendered context window.
    Show {
        /// List stored turns instead of the rendered window.
        #[arg(long)]
        raw: bool,
    },

    /// Show turn count and limits.
    Stats,
}
