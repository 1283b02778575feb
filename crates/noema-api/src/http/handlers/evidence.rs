//! Evidence ingestion and indexing endpoints.
//!
//! Only raw evidence (text, logs, OCR, transcripts) is accepted here.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use noema_types::evidence::{CognifyResponse, IngestRequest, IngestResponse};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /ingest - Store a piece of evidence in the memory backend.
///
/// Fails with 500 and the underlying cause when the backend rejects it.
pub async fn ingest_evidence(
    State(state): State<AppState>,
    body: Result<Json<IngestRequest>, JsonRejection>,
) -> Result<Json<IngestResponse>, AppError> {
    let Json(request) = body?;
    let response = state.memory.ingest_evidence(&request).await?;
    Ok(Json(response))
}

/// POST /cognify - Rebuild the backend's vector and graph representations.
///
/// Always 200; failures are reported as `status: "error"` in the body.
pub async fn run_cognify(State(state): State<AppState>) -> Json<CognifyResponse> {
    Json(state.memory.reindex_all().await)
}
