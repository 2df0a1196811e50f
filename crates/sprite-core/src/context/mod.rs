//! Shared conversation context.
//!
//! A single, globally ordered, capacity-bounded log of turns shared by every
//! user the bot talks to:
//! - `repository`: the persistence port
//! - `store`: retention policy and the read/append contract
//! - `window`: rendering and trimming of the context block
//! - `memory`: an in-process repository

pub mod memory;
pub mod repository;
pub mod store;
pub mod window;
