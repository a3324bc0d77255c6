//! Core data models used by the library.

use serde::Serialize;

/// One retrievable unit: a passage, where it came from, and its embedding.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkRecord {
    pub text: String,
    pub source_url: String,
    pub embedding: Vec<f32>,
}

/// A single retrieval hit with score, text and source url.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchHit {
    pub url: String,
    pub text: String,
    pub score: f32,
}
