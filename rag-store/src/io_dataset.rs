//! Dataset reader: three parallel arrays in one JSON document.
//!
//! Expected shape:
//!
//! ```json
//! {
//!   "chunks":      ["passage one", "passage two"],
//!   "embeddings":  [[0.1, 0.2, 0.3], [0.0, 0.5, 0.1]],
//!   "source_urls": ["https://a", "https://b"]
//! }
//! ```
//!
//! Index `i` across the three arrays describes one record.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::RagError;
use crate::record::ChunkRecord;

#[derive(Deserialize)]
struct DatasetFile {
    chunks: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    source_urls: Vec<String>,
}

/// Reads the dataset file and zips its arrays into records.
///
/// # Errors
/// - [`RagError::Io`] if the file cannot be opened or read.
/// - [`RagError::Parse`] if the JSON does not have the expected shape.
/// - [`RagError::LengthMismatch`] if the arrays differ in length.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<ChunkRecord>, RagError> {
    info!("Reading embeddings dataset: {:?}", path.as_ref());

    let file = File::open(path.as_ref())?;
    let data: DatasetFile = serde_json::from_reader(BufReader::new(file))?;

    let records = records_from_parallel(data.chunks, data.embeddings, data.source_urls)?;
    debug!("Loaded {} chunk records", records.len());
    Ok(records)
}

/// Zips the parallel arrays into records, checking they line up.
///
/// # Errors
/// [`RagError::LengthMismatch`] if the three inputs differ in length.
pub fn records_from_parallel(
    chunks: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    source_urls: Vec<String>,
) -> Result<Vec<ChunkRecord>, RagError> {
    if chunks.len() != embeddings.len() || chunks.len() != source_urls.len() {
        return Err(RagError::LengthMismatch {
            chunks: chunks.len(),
            embeddings: embeddings.len(),
            source_urls: source_urls.len(),
        });
    }

    Ok(chunks
        .into_iter()
        .zip(embeddings)
        .zip(source_urls)
        .map(|((text, embedding), source_url)| ChunkRecord {
            text,
            source_url,
            embedding,
        })
        .collect())
}
