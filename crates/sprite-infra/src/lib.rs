//! Infrastructure layer for Sprite.
//!
//! Contains implementations of the ports defined in `sprite-core`: SQLite
//! storage for the shared context, the OpenAI-compatible completion
//! provider, and configuration loading.

pub mod config;
pub mod llm;
pub mod sqlite;
