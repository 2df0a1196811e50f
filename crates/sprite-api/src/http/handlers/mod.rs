//! REST API handlers, one module per resource.

pub mod context;
pub mod events;
