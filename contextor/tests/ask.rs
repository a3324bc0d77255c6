use std::sync::{Arc, Mutex};

use ai_llm_service::{AiLlmError, ConfigError, EmbeddingsProvider, TextGenerator};
use async_trait::async_trait;
use contextor::{Citation, Contextor, ContextorError, NO_MATCH_ANSWER, QaAnswer};
use rag_store::{ChunkRecord, SearchConfig, SimilarityIndex};

/// Returns a fixed vector, or fails when `vector` is `None`.
struct FixedEmbedder {
    vector: Option<Vec<f32>>,
}

#[async_trait]
impl EmbeddingsProvider for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, AiLlmError> {
        self.vector
            .clone()
            .ok_or_else(|| ConfigError::MissingVar("GENAI_API_KEY").into())
    }
}

/// Records every prompt and answers with a canned reply.
struct RecordingGenerator {
    reply: Result<String, ()>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .map_err(|_| ConfigError::EmptyModel.into())
    }
}

fn index() -> Arc<SimilarityIndex> {
    let records = vec![
        ChunkRecord {
            text: "X is the unknown in an equation.".into(),
            source_url: "https://course.example/x".into(),
            embedding: vec![1.0, 0.0, 0.0],
        },
        ChunkRecord {
            text: "Unrelated passage about Y.".into(),
            source_url: "https://course.example/y".into(),
            embedding: vec![0.0, 1.0, 0.0],
        },
    ];
    Arc::new(SimilarityIndex::new(records, SearchConfig::default()).unwrap())
}

fn contextor(vector: Option<Vec<f32>>, generator: Arc<RecordingGenerator>) -> Contextor {
    Contextor::new(index(), Arc::new(FixedEmbedder { vector }), generator)
}

#[tokio::test]
async fn answers_with_single_citation() {
    let generator = RecordingGenerator::replying(
        "X is the unknown [https://course.example/x].\n\nSources:\n\
         Source: https://course.example/x, Text: \"X is the unknown in an equation.\"",
    );
    let ctx = contextor(Some(vec![1.0, 0.05, 0.0]), generator.clone());

    let qa = ctx.ask("What is X?").await.unwrap();

    assert_eq!(qa.answer, "X is the unknown [https://course.example/x].");
    assert_eq!(
        qa.links,
        vec![Citation::new(
            "https://course.example/x",
            "X is the unknown in an equation."
        )]
    );

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("What is X?"));
    assert!(prompts[0].contains("X is the unknown in an equation."));
    assert!(prompts[0].contains("https://course.example/x"));
    assert!(!prompts[0].contains("Unrelated passage about Y."));
}

#[tokio::test]
async fn no_match_skips_generation() {
    let generator = RecordingGenerator::replying("should not be used");
    let ctx = contextor(Some(vec![0.0, 0.0, 1.0]), generator.clone());

    let qa = ctx.ask("Something else entirely?").await.unwrap();

    assert_eq!(
        qa,
        QaAnswer {
            answer: NO_MATCH_ANSWER.to_string(),
            links: vec![],
        }
    );
    assert_eq!(
        serde_json::to_value(&qa).unwrap(),
        serde_json::json!({"answer": "No relevant information found.", "links": []})
    );
    assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn embedding_failure_is_typed() {
    let generator = RecordingGenerator::replying("unused");
    let ctx = contextor(None, generator.clone());

    let err = ctx.ask("What is X?").await.unwrap_err();
    assert!(matches!(err, ContextorError::Embedding(_)));
    assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn generation_failure_is_typed() {
    let ctx = contextor(Some(vec![1.0, 0.0, 0.0]), RecordingGenerator::failing());

    let err = ctx.ask("What is X?").await.unwrap_err();
    assert!(matches!(err, ContextorError::Generation(_)));
}

#[tokio::test]
async fn blank_question_is_rejected_before_any_call() {
    let generator = RecordingGenerator::replying("unused");
    let ctx = contextor(None, generator.clone());

    let err = ctx.ask("   ").await.unwrap_err();
    assert!(matches!(err, ContextorError::EmptyQuestion));
}

#[tokio::test]
async fn unstructured_reply_falls_back_to_scraped_links() {
    let generator =
        RecordingGenerator::replying("See https://course.example/x for the definition.");
    let ctx = contextor(Some(vec![1.0, 0.0, 0.0]), generator);

    let qa = ctx.ask("What is X?").await.unwrap();
    assert_eq!(
        qa.links,
        vec![Citation::new(
            "https://course.example/x",
            "Link referenced in answer."
        )]
    );
}
