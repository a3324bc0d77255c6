//! Shared LLM service with two profiles: `generation` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Both clients are built eagerly so configuration problems surface at startup.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{LlmServiceProfiles, TextGenerator, EmbeddingsProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let svc = Arc::new(LlmServiceProfiles::from_env()?);
//!
//!     let txt = svc.generate("Hello world").await?;
//!     println!("{txt}");
//!
//!     let emb = svc.embed("Ferris").await?;
//!     println!("Embedding dim = {}", emb.len());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use crate::{
    config::{
        default_config::{config_gemini_embedding, config_gemini_generation},
        llm_model_config::LlmModelConfig,
    },
    error_handler::AiLlmError,
    providers::{EmbeddingsProvider, TextGenerator},
    services::gemini_service::GeminiService,
};

/// Owns one Gemini client per profile.
#[derive(Debug)]
pub struct LlmServiceProfiles {
    generation: GeminiService,
    embedding: GeminiService,
}

impl LlmServiceProfiles {
    /// Creates the service from explicit profile configs.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if either client cannot be constructed.
    pub fn new(generation: LlmModelConfig, embedding: LlmModelConfig) -> Result<Self, AiLlmError> {
        Ok(Self {
            generation: GeminiService::new(generation)?,
            embedding: GeminiService::new(embedding)?,
        })
    }

    /// Creates the service from `GENAI_*` / `LLM_*` environment variables.
    ///
    /// # Errors
    /// Missing `GENAI_API_KEY` or malformed knobs yield [`AiLlmError::Config`].
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::new(config_gemini_generation()?, config_gemini_embedding()?)
    }

    /// Returns references to the current profiles `(generation, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (self.generation.config(), self.embedding.config())
    }
}

#[async_trait]
impl TextGenerator for LlmServiceProfiles {
    async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        self.generation.generate(prompt).await
    }
}

#[async_trait]
impl EmbeddingsProvider for LlmServiceProfiles {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AiLlmError> {
        self.embedding.embeddings(text).await
    }
}
