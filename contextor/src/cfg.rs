//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

use rag_store::{DEFAULT_MAX_RESULTS, DEFAULT_SIMILARITY_THRESHOLD, SearchConfig};

use crate::error::ContextorError;

pub const DEFAULT_EMBEDDINGS_FILE: &str = "data/embeddings.json";

/// Config bag for retrieval. All fields have defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextorConfig {
    /// Dataset with `chunks`, `embeddings` and `source_urls` arrays.
    pub embeddings_file: PathBuf,
    /// Threshold and cap for the similarity search.
    pub search: SearchConfig,
}

impl Default for ContextorConfig {
    fn default() -> Self {
        Self {
            embeddings_file: PathBuf::from(DEFAULT_EMBEDDINGS_FILE),
            search: SearchConfig::default(),
        }
    }
}

impl ContextorConfig {
    /// Build from `EMBEDDINGS_FILE`, `SIMILARITY_THRESHOLD` and `MAX_RESULTS`.
    ///
    /// # Errors
    /// [`ContextorError::Config`] if a numeric variable does not parse or the
    /// resulting search config is out of range.
    pub fn from_env() -> Result<Self, ContextorError> {
        Self::from_lookup(&|k: &str| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ContextorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let embeddings_file = env(lookup, "EMBEDDINGS_FILE", DEFAULT_EMBEDDINGS_FILE);
        let search = SearchConfig {
            threshold: parse(lookup, "SIMILARITY_THRESHOLD", DEFAULT_SIMILARITY_THRESHOLD)?,
            max_results: parse(lookup, "MAX_RESULTS", DEFAULT_MAX_RESULTS)?,
        };
        search
            .validate()
            .map_err(|e| ContextorError::Config(e.to_string()))?;

        Ok(Self {
            embeddings_file: PathBuf::from(embeddings_file),
            search,
        })
    }
}

fn env<F>(lookup: &F, k: &str, dflt: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(k)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| dflt.to_string())
}

fn parse<F, T>(lookup: &F, k: &str, dflt: T) -> Result<T, ContextorError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(k).filter(|v| !v.trim().is_empty()) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ContextorError::Config(format!("{k} has an invalid value: {v:?}"))),
        None => Ok(dflt),
    }
}
