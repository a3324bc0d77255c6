use std::sync::Arc;

use ai_llm_service::{AiLlmError, ConfigError, EmbeddingsProvider, TextGenerator};
use api::{AppState, ROOT_MESSAGE, router};
use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use contextor::Contextor;
use rag_store::{ChunkRecord, SearchConfig, SimilarityIndex};
use serde_json::{Value, json};
use tower::ServiceExt;

struct StubEmbedder(Option<Vec<f32>>);

#[async_trait]
impl EmbeddingsProvider for StubEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, AiLlmError> {
        self.0
            .clone()
            .ok_or_else(|| ConfigError::MissingVar("GENAI_API_KEY").into())
    }
}

struct StubGenerator(Option<String>);

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, AiLlmError> {
        self.0.clone().ok_or_else(|| ConfigError::EmptyModel.into())
    }
}

fn app(embedding: Option<Vec<f32>>, reply: Option<&str>) -> axum::Router {
    let records = vec![
        ChunkRecord {
            text: "Gradient descent minimises a loss.".into(),
            source_url: "https://course.example/gd".into(),
            embedding: vec![1.0, 0.0],
        },
        ChunkRecord {
            text: "Second passage from the same page.".into(),
            source_url: "https://course.example/gd".into(),
            embedding: vec![0.9, 0.1],
        },
        ChunkRecord {
            text: "Pandas basics.".into(),
            source_url: "https://course.example/pandas".into(),
            embedding: vec![0.0, 1.0],
        },
    ];
    let index = SimilarityIndex::new(records, SearchConfig::default()).unwrap();
    let contextor = Contextor::new(
        Arc::new(index),
        Arc::new(StubEmbedder(embedding)),
        Arc::new(StubGenerator(reply.map(str::to_string))),
    );
    router(Arc::new(AppState::new(Arc::new(contextor))))
}

async fn json_body(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_query(body: &str) -> Request<Body> {
    Request::post("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_counts() {
    let resp = app(None, None)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({"status": "ok", "chunks": 3, "embeddings": 3})
    );
}

#[tokio::test]
async fn root_is_alive() {
    let resp = app(None, None)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({"message": ROOT_MESSAGE}));
}

#[tokio::test]
async fn query_returns_answer_and_links() {
    let reply = "Gradient descent minimises a loss.\nSources:\n\
                 Source: https://course.example/gd, Text: \"minimises a loss\"";
    let resp = app(Some(vec![1.0, 0.0]), Some(reply))
        .oneshot(post_query(
            r#"{"question":"What does gradient descent do?","image":null}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({
            "answer": "Gradient descent minimises a loss.",
            "links": [{"url": "https://course.example/gd", "text": "minimises a loss"}]
        })
    );
}

#[tokio::test]
async fn query_without_match_is_informational() {
    let resp = app(Some(vec![-1.0, -1.0]), None)
        .oneshot(post_query(r#"{"question":"Unrelated?"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({"answer": "No relevant information found.", "links": []})
    );
}

#[tokio::test]
async fn embedding_failure_is_500() {
    let resp = app(None, Some("unused"))
        .oneshot(post_query(r#"{"question":"What?"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "EMBEDDING_FAILED");
    assert!(body["message"].as_str().unwrap().contains("embed"));
}

#[tokio::test]
async fn generation_failure_is_500() {
    let resp = app(Some(vec![1.0, 0.0]), None)
        .oneshot(post_query(r#"{"question":"What?"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await["error"], "GENERATION_FAILED");
}

#[tokio::test]
async fn malformed_body_is_400() {
    let resp = app(None, None)
        .oneshot(post_query(r#"{"question": 42"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn blank_question_is_400() {
    let resp = app(None, None)
        .oneshot(post_query(r#"{"question":"  "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
