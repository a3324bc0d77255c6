//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors in the dataset file.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The parallel arrays of the dataset do not line up.
    #[error("dataset arrays differ in length: chunks={chunks}, embeddings={embeddings}, source_urls={source_urls}")]
    LengthMismatch {
        chunks: usize,
        embeddings: usize,
        source_urls: usize,
    },

    /// Mismatch in vector dimensionality across records.
    #[error("vector size mismatch at record {index}: got {got}, want {want}")]
    VectorSizeMismatch { index: usize, got: usize, want: usize },
}
