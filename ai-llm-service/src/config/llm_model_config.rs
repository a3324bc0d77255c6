/// Configuration for a single Gemini model invocation profile.
///
/// The same struct describes both the generation and the embedding profile;
/// sampling knobs are simply ignored by the embedding endpoint.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     model: "gemini-1.5-flash".to_string(),
///     endpoint: "https://generativelanguage.googleapis.com".to_string(),
///     api_key: "AIza...".to_string(),
///     max_tokens: Some(1024),
///     temperature: Some(0.2),
///     top_p: None,
///     timeout_secs: Some(60),
/// };
/// assert_eq!(cfg.model_path(), "models/gemini-1.5-flash");
/// ```
#[derive(Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier, with or without the `models/` prefix.
    pub model: String,

    /// API base URL (scheme + host), e.g. `https://generativelanguage.googleapis.com`.
    pub endpoint: String,

    /// API key sent as `x-goog-api-key`.
    pub api_key: String,

    /// Maximum number of output tokens.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Resource path of the model as the REST API expects it (`models/<id>`).
    pub fn model_path(&self) -> String {
        let id = self.model.trim();
        let id = id.strip_prefix("models/").unwrap_or(id);
        format!("models/{id}")
    }
}

// The API key must never end up in logs, so Debug is written by hand.
impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
