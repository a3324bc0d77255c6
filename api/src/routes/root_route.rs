use axum::Json;
use serde::Serialize;

pub const ROOT_MESSAGE: &str = "Course Q&A semantic search service is running!";

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Handler: GET /
pub async fn root_route() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE,
    })
}
