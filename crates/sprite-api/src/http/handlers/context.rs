//! Shared context inspection.
//!
//! GET /api/v1/context - Rendered context window, stored turn count, and
//! limits. `?raw=true` also lists the stored turns, newest first.

use std::time::Instant;

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use sprite_types::turn::Turn;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ContextQuery {
    #[serde(default)]
    pub raw: bool,
}

#[derive(Debug, Serialize)]
pub struct ContextView {
    pub context: String,
    pub stored_turns: u64,
    pub max_turns: u32,
    pub max_chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turns: Option<Vec<Turn>>,
}

/// GET /api/v1/context
pub async fn get_context(
    State(state): State<AppState>,
    Query(query): Query<ContextQuery>,
) -> Result<Json<ApiResponse<ContextView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let context = state.store.read_context().await?;
    let stored_turns = state.store.turn_count().await?;
    let turns = if query.raw {
        Some(state.store.recent_turns().await?)
    } else {
        None
    };
    let limits = state.store.limits();

    let view = ContextView {
        context,
        stored_turns,
        max_turns: limits.max_turns,
        max_chars: limits.max_chars,
        turns,
    };
    Ok(Json(ApiResponse::success(view, request_id, start)))
}
