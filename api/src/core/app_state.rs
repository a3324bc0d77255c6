use std::sync::Arc;

use contextor::Contextor;

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8000";

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Index + providers; read-only after startup.
    pub contextor: Arc<Contextor>,
}

impl AppState {
    pub fn new(contextor: Arc<Contextor>) -> Self {
        Self { contextor }
    }
}

/// Listener settings.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// `host:port` to bind, from `API_ADDRESS`.
    pub address: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let address = std::env::var("API_ADDRESS")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_ADDRESS.into());
        Self { address }
    }
}
