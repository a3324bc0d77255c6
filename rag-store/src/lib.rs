//! Read-only similarity index over precomputed chunk embeddings.
//!
//! This crate provides a small API to:
//! - Load a dataset of `(chunk text, source url, embedding)` triples from disk
//! - Search it with a query vector: cosine score, relevance threshold, one hit per source
//!
//! The index is built once at startup and never mutated, so it can be shared
//! behind an `Arc` across request handlers without locking.

mod config;
mod errors;
mod index;
mod io_dataset;
mod record;
mod similarity;

pub use config::{DEFAULT_MAX_RESULTS, DEFAULT_SIMILARITY_THRESHOLD, SearchConfig};
pub use errors::RagError;
pub use index::SimilarityIndex;
pub use io_dataset::{load_dataset, records_from_parallel};
pub use record::{ChunkRecord, SearchHit};
pub use similarity::cosine_similarity;
