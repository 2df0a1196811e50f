//! Per-message response cycle.
//!
//! `ResponseOrchestrator` runs one request/response cycle for each incoming
//! mention: filter, extract, fetch context, compose and invoke, reply and
//! record. Helpers for mention handling, prompt composition and reply
//! wording live beside it.

pub mod mention;
pub mod orchestrator;
pub mod prompt;
pub mod reply;
