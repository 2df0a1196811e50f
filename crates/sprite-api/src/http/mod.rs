//! HTTP relay for Sprite.
//!
//! Axum-based REST API at `/api/v1/` with an envelope response format and
//! CORS support. A chat-platform gateway forwards message events here.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
