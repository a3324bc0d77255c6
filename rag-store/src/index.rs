//! The in-memory index and its single query operation.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, trace};

use crate::config::SearchConfig;
use crate::errors::RagError;
use crate::io_dataset::load_dataset;
use crate::record::{ChunkRecord, SearchHit};
use crate::similarity::cosine_similarity;

/// Immutable collection of chunk records searched by brute-force cosine.
#[derive(Debug)]
pub struct SimilarityIndex {
    records: Vec<ChunkRecord>,
    dimension: Option<usize>,
    cfg: SearchConfig,
}

impl SimilarityIndex {
    /// Builds an index over `records`.
    ///
    /// # Errors
    /// - [`RagError::Config`] if `cfg` is invalid.
    /// - [`RagError::VectorSizeMismatch`] if embeddings differ in length.
    pub fn new(records: Vec<ChunkRecord>, cfg: SearchConfig) -> Result<Self, RagError> {
        cfg.validate()?;

        let dimension = records.first().map(|r| r.embedding.len());
        if let Some(want) = dimension {
            if let Some((index, r)) = records
                .iter()
                .enumerate()
                .find(|(_, r)| r.embedding.len() != want)
            {
                return Err(RagError::VectorSizeMismatch {
                    index,
                    got: r.embedding.len(),
                    want,
                });
            }
        }

        Ok(Self {
            records,
            dimension,
            cfg,
        })
    }

    /// Loads the dataset file at `path` and builds an index over it.
    ///
    /// # Errors
    /// Any [`RagError`] from [`load_dataset`] or [`SimilarityIndex::new`].
    pub fn load(path: impl AsRef<Path>, cfg: SearchConfig) -> Result<Self, RagError> {
        let index = Self::new(load_dataset(path)?, cfg)?;
        info!(
            records = index.len(),
            dimension = index.dimension.unwrap_or(0),
            threshold = index.cfg.threshold,
            max_results = index.cfg.max_results,
            "similarity index ready"
        );
        Ok(index)
    }

    /// Number of records (chunks, embeddings and urls are always equal).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding dimensionality, `None` for an empty index.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Returns the best-scoring chunk per source url, above the threshold.
    ///
    /// Scores every record, sorts descending (ties keep dataset order), then
    /// walks the list keeping the first hit seen for each `source_url` until
    /// the result cap is reached. Output is in descending score order.
    pub fn search(&self, query: &[f32]) -> Vec<SearchHit> {
        if let Some(dim) = self.dimension {
            if dim != query.len() {
                debug!(
                    query_dim = query.len(),
                    index_dim = dim,
                    "query dimension differs from index; every score will be 0"
                );
            }
        }

        let mut scored: Vec<(usize, f32)> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let s = cosine_similarity(query, &r.embedding);
                (i, if s.is_nan() { f32::NEG_INFINITY } else { s })
            })
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::with_capacity(self.cfg.max_results);

        for (i, score) in scored {
            // Sorted descending: nothing after this point can qualify.
            if score < self.cfg.threshold {
                break;
            }
            let rec = &self.records[i];
            if !seen.insert(rec.source_url.as_str()) {
                continue;
            }
            out.push(SearchHit {
                url: rec.source_url.clone(),
                text: rec.text.clone(),
                score,
            });
            if out.len() >= self.cfg.max_results {
                break;
            }
        }

        trace!(hits = out.len(), "SimilarityIndex::search");
        out
    }
}
