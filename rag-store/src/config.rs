//! Search knobs.

use crate::errors::RagError;

/// Minimum cosine score for a chunk to count as relevant.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.68;

/// Maximum number of hits (distinct sources) returned by a search.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Configuration for [`crate::SimilarityIndex::search`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Hits scoring strictly below this are dropped.
    pub threshold: f32,
    /// Result cap.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchConfig {
    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if !self.threshold.is_finite() || !(-1.0..=1.0).contains(&self.threshold) {
            return Err(RagError::Config(format!(
                "threshold must be within -1.0..=1.0, got {}",
                self.threshold
            )));
        }
        if self.max_results == 0 {
            return Err(RagError::Config("max_results must be > 0".into()));
        }
        Ok(())
    }
}
