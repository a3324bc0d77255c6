//! POST /query: answers a course question with retrieved context and citations.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::query::query_request::{QueryRequest, QueryResponse},
};

/// Handler: POST /query
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/query \
///   -H 'content-type: application/json' \
///   -d '{"question":"What is cosine similarity?"}'
/// ```
pub async fn query_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> AppResult<Json<QueryResponse>> {
    let request_id = headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    let Json(body) = payload?;

    debug!(
        request_id = %request_id,
        question_len = body.question.len(),
        has_image = body.image.is_some(),
        "query_route: start"
    );

    match state.contextor.ask(&body.question).await {
        Ok(qa) => {
            debug!(
                request_id = %request_id,
                links = qa.links.len(),
                "query_route: success"
            );
            Ok(Json(qa.into()))
        }
        Err(err) => {
            error!(
                request_id = %request_id,
                error = %err,
                "query_route: failed"
            );
            Err(AppError::from(err))
        }
    }
}
