use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub chunks: usize,
    pub embeddings: usize,
}

/// Handler: GET /health. Reports dataset sizes without calling upstream.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    // Chunks and embeddings are parallel arrays, equal by construction.
    let n = state.contextor.index().len();
    Json(HealthResponse {
        status: "ok",
        chunks: n,
        embeddings: n,
    })
}
