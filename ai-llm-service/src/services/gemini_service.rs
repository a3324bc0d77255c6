//! Gemini service for text generation and embeddings.
//!
//! Minimal, non-streaming client around the Generative Language REST API.
//! Endpoints are derived from `LlmModelConfig::endpoint` and the model path:
//! - POST {endpoint}/v1beta/models/{model}:generateContent: single completion
//! - POST {endpoint}/v1beta/models/{model}:embedContent: single embedding
//!
//! Constructor validation:
//! - `cfg.endpoint` must start with http:// or https://
//! - `cfg.model` must not be empty
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, ConfigError, HttpError, ProviderError, ProviderErrorKind, make_snippet,
    },
};

const OP_GENERATE: &str = "generateContent";
const OP_EMBED: &str = "embedContent";
const OP_INIT: &str = "init";

/// Task hint sent with every embedding request; the stored dataset was
/// embedded with the same hint, so query vectors stay comparable.
const EMBED_TASK_TYPE: &str = "SEMANTIC_SIMILARITY";

/// Thin client for the Gemini API.
///
/// Holds a preconfigured `reqwest::Client` (timeout and API key header)
/// and the two resolved URLs for the configured model.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    model_path: String,
    url_generate: String,
    url_embed: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Config`] with `EmptyModel` if `cfg.model` is blank
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                OP_INIT,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(60));

        let mut api_key = header::HeaderValue::from_str(&cfg.api_key).map_err(|e| {
            ProviderError::new(
                OP_INIT,
                ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
            )
        })?;
        api_key.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert("x-goog-api-key", api_key);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        let model_path = cfg.model_path();
        let url_generate = format!("{base}/v1beta/{model_path}:{OP_GENERATE}");
        let url_embed = format!("{base}/v1beta/{model_path}:{OP_EMBED}");

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            model_path,
            url_generate,
            url_embed,
        })
    }

    /// The config this client was built from.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// Performs a single non-streaming `generateContent` call.
    ///
    /// The prompt is sent as one user turn; `temperature`, `top_p` and
    /// `max_tokens` from the config are mapped to `generationConfig`.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    /// - [`AiLlmError::Provider`] with `EmptyCandidates` if no text came back
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_generate
        );

        let out: GenerateContentResponse = self
            .post_json(OP_GENERATE, &self.url_generate, &body, started)
            .await?;
        let text = out.into_text()?;

        info!(
            model = %self.cfg.model,
            answer_len = text.len(),
            latency_ms = started.elapsed().as_millis(),
            "generation completed"
        );

        Ok(text)
    }

    /// Retrieves a single embedding vector via `embedContent`.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    /// - [`AiLlmError::Provider`] with `EmptyEmbedding` for a zero-length vector
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        let started = Instant::now();
        let body = EmbedContentRequest {
            model: &self.model_path,
            content: Content {
                role: None,
                parts: vec![Part { text: input }],
            },
            task_type: EMBED_TASK_TYPE,
        };

        debug!(
            model = %self.cfg.model,
            input_len = input.len(),
            "POST {}", self.url_embed
        );

        let out: EmbedContentResponse = self
            .post_json(OP_EMBED, &self.url_embed, &body, started)
            .await?;
        let values = out.into_values()?;

        info!(
            model = %self.cfg.model,
            dim = values.len(),
            latency_ms = started.elapsed().as_millis(),
            "embedding completed"
        );

        Ok(values)
    }

    async fn post_json<B, R>(
        &self,
        operation: &'static str,
        url: &str,
        body: &B,
        started: Instant,
    ) -> Result<R, AiLlmError>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let resp = self.client.post(url).json(body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Gemini {operation} returned non-success status"
            );

            return Err(ProviderError::new(
                operation,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url: url.to_string(),
                    snippet,
                }),
            )
            .into());
        }

        resp.json::<R>().await.map_err(|e| {
            error!(
                error = %e,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode Gemini {operation} response"
            );
            ProviderError::new(operation, ProviderErrorKind::Decode(format!("serde error: {e}")))
                .into()
        })
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "GenerationConfig::is_empty")]
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                max_output_tokens: cfg.max_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.top_p.is_none() && self.max_output_tokens.is_none()
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: &'a str,
    content: Content<'a>,
    task_type: &'a str,
}

/// Response of `generateContent`; only the fields we read.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Joined text parts of the first candidate that has any text, trimmed.
    fn into_text(self) -> Result<String, AiLlmError> {
        self.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .map(|s| s.trim().to_string())
            .find(|s| !s.is_empty())
            .ok_or_else(|| ProviderError::new(OP_GENERATE, ProviderErrorKind::EmptyCandidates).into())
    }
}

/// Response of `embedContent`.
#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    #[serde(default)]
    values: Vec<f32>,
}

impl EmbedContentResponse {
    fn into_values(self) -> Result<Vec<f32>, AiLlmError> {
        if self.embedding.values.is_empty() {
            return Err(ProviderError::new(OP_EMBED, ProviderErrorKind::EmptyEmbedding).into());
        }
        Ok(self.embedding.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            model: "gemini-1.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com/".into(),
            api_key: "test-key".into(),
            max_tokens: Some(256),
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn urls_are_derived_from_model_path() {
        let svc = GeminiService::new(cfg()).unwrap();
        assert_eq!(
            svc.url_generate,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert!(svc.url_embed.ends_with("/v1beta/models/gemini-1.5-flash:embedContent"));
    }

    #[test]
    fn rejects_bad_endpoint_and_empty_model() {
        let mut bad = cfg();
        bad.endpoint = "localhost:8080".into();
        assert!(matches!(
            GeminiService::new(bad),
            Err(AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::InvalidEndpoint(_),
                ..
            }))
        ));

        let mut empty = cfg();
        empty.model = "  ".into();
        assert!(matches!(
            GeminiService::new(empty),
            Err(AiLlmError::Config(ConfigError::EmptyModel))
        ));
    }

    #[test]
    fn generate_request_shape() {
        let c = cfg();
        let body = serde_json::to_value(GenerateContentRequest::from_cfg(&c, "hi")).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
        assert!(body["generationConfig"].get("topP").is_none());
    }

    #[test]
    fn embed_request_shape() {
        let body = serde_json::to_value(EmbedContentRequest {
            model: "models/embedding-001",
            content: Content {
                role: None,
                parts: vec![Part { text: "q" }],
            },
            task_type: EMBED_TASK_TYPE,
        })
        .unwrap();
        assert_eq!(body["taskType"], "SEMANTIC_SIMILARITY");
        assert_eq!(body["content"]["parts"][0]["text"], "q");
        assert!(body["content"].get("role").is_none());
    }

    #[test]
    fn picks_first_candidate_with_text() {
        let raw = r#"{"candidates":[
            {"content":{"parts":[]}},
            {"content":{"parts":[{"text":"  Hello "},{"text":"world\n"}]}}
        ]}"#;
        let resp: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.into_text().unwrap(), "Hello world");
    }

    #[test]
    fn blocked_prompt_is_empty_candidates() {
        let raw = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let resp: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            resp.into_text(),
            Err(AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::EmptyCandidates,
                ..
            }))
        ));
    }

    #[test]
    fn embedding_values_are_required() {
        let ok: EmbedContentResponse =
            serde_json::from_str(r#"{"embedding":{"values":[0.1,0.2]}}"#).unwrap();
        assert_eq!(ok.into_values().unwrap(), vec![0.1, 0.2]);

        let empty: EmbedContentResponse =
            serde_json::from_str(r#"{"embedding":{"values":[]}}"#).unwrap();
        assert!(empty.into_values().is_err());
    }
}
