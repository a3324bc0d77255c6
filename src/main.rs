use std::{error::Error, sync::Arc};

use ai_llm_service::{LlmServiceProfiles, telemetry};
use api::{ApiConfig, AppState};
use contextor::{Contextor, ContextorConfig};
use tracing::{Level, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; variables may come from the environment.
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        return Err(e.into());
    }

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::INFO))
        .with(telemetry::app_layer())
        .with(telemetry::layer())
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "startup failed");
        return Err(e);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn Error>> {
    let profiles = Arc::new(LlmServiceProfiles::from_env()?);
    let (generation, embedding) = profiles.profiles();
    info!(
        generation_model = %generation.model,
        embedding_model = %embedding.model,
        "LLM profiles ready"
    );

    let cfg = ContextorConfig::from_env()?;
    let contextor = Contextor::load(&cfg, profiles.clone(), profiles)?;
    info!(
        file = %cfg.embeddings_file.display(),
        chunks = contextor.index().len(),
        "similarity index loaded"
    );

    let state = Arc::new(AppState::new(Arc::new(contextor)));
    api::start(state, &ApiConfig::from_env()).await?;
    Ok(())
}
