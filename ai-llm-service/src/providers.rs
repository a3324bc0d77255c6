//! Capability traits for the two upstream calls.
//!
//! Consumers hold `Arc<dyn EmbeddingsProvider>` / `Arc<dyn TextGenerator>`
//! so tests can swap in canned implementations.

use async_trait::async_trait;

use crate::error_handler::AiLlmError;

/// Turns text into a dense vector.
#[async_trait]
pub trait EmbeddingsProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AiLlmError>;
}

/// Turns a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AiLlmError>;
}
