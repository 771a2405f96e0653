use anyhow::Result;
use linguabridge::{config::Config, engine::ResolutionEngine, server};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("linguabridge=info".parse()?),
        )
        .init();

    info!("Starting LinguaBridge translation server");

    let config = Config::from_env()?;
    let engine = ResolutionEngine::from_config(&config)?;

    let providers: Vec<String> = engine
        .provider_ids()
        .iter()
        .map(|id| id.to_string())
        .collect();
    info!("Providers: {}", providers.join(", "));
    info!(
        "Resolution strategy: {}, quality threshold: {}",
        engine.strategy(),
        config.quality_threshold
    );

    server::serve(config.port, Arc::new(engine)).await
}
