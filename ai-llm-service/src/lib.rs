//! Gemini-backed LLM service shared by the workspace.
//!
//! Two logical profiles are exposed through [`service_profiles::LlmServiceProfiles`]:
//! **generation** (free text from a prompt) and **embedding** (a dense vector from text).
//! Callers that only need one capability depend on the [`TextGenerator`] or
//! [`EmbeddingsProvider`] traits, which keeps them testable without network access.

pub mod config;
pub mod error_handler;
pub mod providers;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind};
pub use providers::{EmbeddingsProvider, TextGenerator};
pub use service_profiles::LlmServiceProfiles;
