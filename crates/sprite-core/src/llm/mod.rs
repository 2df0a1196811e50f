//! Completion-service abstractions for Sprite.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: object-safe wrapper for runtime dispatch

pub mod box_provider;
pub mod provider;
