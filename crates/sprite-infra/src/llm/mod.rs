//! Completion-service provider implementations.

pub mod openai_compat;
