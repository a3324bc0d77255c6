//! RAG + LLM gateway for course questions.
//!
//! [`Contextor::ask`] embeds the question, retrieves the best chunk per source
//! from the in-memory [`SimilarityIndex`], builds a citation-demanding prompt,
//! calls the generation model, and parses the reply into an answer with links.

mod api_types;
mod cfg;
mod error;
pub mod parse;
pub mod prompt;

use std::sync::Arc;
use std::time::Instant;

use ai_llm_service::{EmbeddingsProvider, TextGenerator};
use rag_store::SimilarityIndex;
use tracing::{debug, info};

pub use api_types::{Citation, QaAnswer};
pub use cfg::{ContextorConfig, DEFAULT_EMBEDDINGS_FILE};
pub use error::ContextorError;
pub use parse::{ParsedAnswer, parse_answer};
pub use prompt::build_prompt;

/// Canned answer when no chunk clears the relevance threshold.
pub const NO_MATCH_ANSWER: &str = "No relevant information found.";

/// Read-only context shared by every request: the index and both providers.
///
/// Construct once at startup, wrap in `Arc`, and hand to the HTTP layer.
pub struct Contextor {
    index: Arc<SimilarityIndex>,
    embedder: Arc<dyn EmbeddingsProvider>,
    generator: Arc<dyn TextGenerator>,
}

impl Contextor {
    pub fn new(
        index: Arc<SimilarityIndex>,
        embedder: Arc<dyn EmbeddingsProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            index,
            embedder,
            generator,
        }
    }

    /// Loads the index described by `cfg` and wires it to the providers.
    ///
    /// # Errors
    /// [`ContextorError::Rag`] if the dataset cannot be read or is inconsistent.
    pub fn load(
        cfg: &ContextorConfig,
        embedder: Arc<dyn EmbeddingsProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self, ContextorError> {
        let index = SimilarityIndex::load(&cfg.embeddings_file, cfg.search)?;
        Ok(Self::new(Arc::new(index), embedder, generator))
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Answer a question with retrieved context and citations.
    ///
    /// When nothing in the index clears the threshold the canned
    /// [`NO_MATCH_ANSWER`] is returned and the generation model is not called.
    ///
    /// # Errors
    /// - [`ContextorError::EmptyQuestion`] for a blank question
    /// - [`ContextorError::Embedding`] if the embedding call fails
    /// - [`ContextorError::Generation`] if the generation call fails
    ///
    /// # Example
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use contextor::{Contextor, ContextorConfig};
    /// # use ai_llm_service::LlmServiceProfiles;
    /// # #[tokio::main] async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let llm = Arc::new(LlmServiceProfiles::from_env()?);
    /// let ctx = Contextor::load(&ContextorConfig::from_env()?, llm.clone(), llm)?;
    /// let qa = ctx.ask("What is cosine similarity?").await?;
    /// println!("{} ({} links)", qa.answer, qa.links.len());
    /// # Ok(()) }
    /// ```
    pub async fn ask(&self, question: &str) -> Result<QaAnswer, ContextorError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ContextorError::EmptyQuestion);
        }
        let started = Instant::now();

        // 1) Embed
        let query = self
            .embedder
            .embed(question)
            .await
            .map_err(ContextorError::Embedding)?;

        // 2) Retrieve
        let hits = self.index.search(&query);
        debug!(
            hits = hits.len(),
            top_score = hits.first().map(|h| h.score).unwrap_or(0.0),
            "retrieved context"
        );
        if hits.is_empty() {
            info!(
                latency_ms = started.elapsed().as_millis(),
                "no chunk above threshold"
            );
            return Ok(QaAnswer {
                answer: NO_MATCH_ANSWER.to_string(),
                links: Vec::new(),
            });
        }

        // 3) Prompt + generate
        let prompt = build_prompt(question, &hits);
        let raw = self
            .generator
            .generate(&prompt)
            .await
            .map_err(ContextorError::Generation)?;

        // 4) Parse
        let ParsedAnswer { answer, links } = parse_answer(&raw);
        info!(
            context = hits.len(),
            links = links.len(),
            latency_ms = started.elapsed().as_millis(),
            "question answered"
        );

        Ok(QaAnswer { answer, links })
    }
}
