//! POST /search - Evidence snippets plus related graph context.
//!
//! Returns candidates only; filtering, ranking and reasoning stay with NOEMA.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use noema_types::search::{SearchRequest, SearchResponse};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /search - Search the memory backend.
///
/// Backend failures degrade to an empty result; only a malformed request
/// (e.g. `topK` outside 1..=50) is an error.
pub async fn search_memory(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(request) = body?;
    let response = state.memory.search(&request.query, request.top_k).await?;
    Ok(Json(response))
}
