//! Shared domain types for Sprite.
//!
//! This crate contains the core domain types used across the Sprite
//! responder: conversation turns, chat events, completion request/response
//! shapes, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod turn;
