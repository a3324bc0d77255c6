//! Default Gemini configs loaded from environment variables.
//!
//! Two roles are supported:
//!
//! - **Generation** → answers questions from a composed prompt
//! - **Embedding**  → turns text into a dense vector for similarity search
//!
//! # Environment variables
//!
//! - `GENAI_API_KEY`         = API key (mandatory)
//! - `GENAI_ENDPOINT`        = API base URL (default `https://generativelanguage.googleapis.com`)
//! - `GENAI_MODEL`           = generation model (default `gemini-1.5-flash`)
//! - `GENAI_EMBEDDING_MODEL` = embedding model (default `embedding-001`)
//! - `LLM_MAX_TOKENS`        = optional max output tokens (u32)
//! - `LLM_TEMPERATURE`       = optional temperature (f32, `0.0..=2.0`, default `0.2`)
//! - `LLM_TIMEOUT_SECS`      = optional generation timeout (u64, default `60`)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        Result, must_var, opt_number, opt_var, validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_EMBEDDING_MODEL: &str = "embedding-001";

const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;
const EMBEDDING_TIMEOUT_SECS: u64 = 30;

/// Generation profile from the process environment.
///
/// # Errors
/// - `ConfigError::MissingVar` if `GENAI_API_KEY` is absent
/// - `ConfigError::InvalidNumber` / `ConfigError::OutOfRange` for bad knobs
/// - `ConfigError::InvalidFormat` if `GENAI_ENDPOINT` lacks a scheme
pub fn config_gemini_generation() -> Result<LlmModelConfig> {
    generation_config_from(&|k: &str| std::env::var(k).ok())
}

/// Embedding profile from the process environment.
///
/// # Errors
/// Same as [`config_gemini_generation`], minus the sampling knobs.
pub fn config_gemini_embedding() -> Result<LlmModelConfig> {
    embedding_config_from(&|k: &str| std::env::var(k).ok())
}

/// Generation profile from an arbitrary variable lookup.
pub fn generation_config_from<F>(lookup: &F) -> Result<LlmModelConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let (endpoint, api_key) = shared(lookup)?;
    let model =
        opt_var(lookup, "GENAI_MODEL").unwrap_or_else(|| DEFAULT_GENERATION_MODEL.to_string());
    let max_tokens = opt_number::<_, u32>(lookup, "LLM_MAX_TOKENS", "expected u32")?;
    let temperature = opt_number::<_, f32>(lookup, "LLM_TEMPERATURE", "expected f32")?
        .unwrap_or(DEFAULT_TEMPERATURE);
    validate_range_f32("temperature", temperature, 0.0, 2.0)?;
    let timeout_secs = opt_number::<_, u64>(lookup, "LLM_TIMEOUT_SECS", "expected u64")?
        .unwrap_or(DEFAULT_GENERATION_TIMEOUT_SECS);

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key,
        max_tokens,
        temperature: Some(temperature),
        top_p: None,
        timeout_secs: Some(timeout_secs),
    })
}

/// Embedding profile from an arbitrary variable lookup.
pub fn embedding_config_from<F>(lookup: &F) -> Result<LlmModelConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let (endpoint, api_key) = shared(lookup)?;
    let model = opt_var(lookup, "GENAI_EMBEDDING_MODEL")
        .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key,
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(EMBEDDING_TIMEOUT_SECS),
    })
}

fn shared<F>(lookup: &F) -> Result<(String, String)>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = must_var(lookup, "GENAI_API_KEY")?;
    let endpoint = opt_var(lookup, "GENAI_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.into());
    validate_http_endpoint("GENAI_ENDPOINT", &endpoint)?;
    Ok((endpoint, api_key))
}
