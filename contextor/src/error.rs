//! Typed error for the contextor crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// The question was empty or whitespace only.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// The embedding provider failed for the question text.
    #[error("embedding failed: {0}")]
    Embedding(#[source] AiLlmError),

    /// The generation provider failed for the composed prompt.
    #[error("generation failed: {0}")]
    Generation(#[source] AiLlmError),

    /// Dataset could not be loaded or indexed.
    #[error("RAG error: {0}")]
    Rag(#[from] rag_store::RagError),

    /// Invalid value in the environment.
    #[error("config error: {0}")]
    Config(String),
}
