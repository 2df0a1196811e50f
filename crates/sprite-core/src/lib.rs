//! Business logic and port trait definitions for Sprite.
//!
//! This crate owns the shared context window policy and the per-message
//! response cycle. It defines the "ports" (`ContextRepository`,
//! `LlmProvider`, `ReplySink`) that adapters implement and depends only on
//! `sprite-types` -- never on `sprite-infra` or any database/IO crate.

pub mod context;
pub mod llm;
pub mod responder;
