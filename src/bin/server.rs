//! scholar-rag server binary
//!
//! Run with: cargo run --bin scholar-rag-server

use std::sync::Arc;

use scholar_rag::{config::RagConfig, engine::RagEngine, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scholar_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = RagConfig::load_default()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - Embedding dimensions: {}", config.embedding.dimensions);
    tracing::info!("  - Generation model: {}", config.llm.generate_model);
    tracing::info!("  - Similarity metric: {:?}", config.index.metric);
    match &config.index.snapshot_path {
        Some(path) => tracing::info!("  - Corpus snapshot: {}", path.display()),
        None => tracing::info!("  - Corpus snapshot: (none)"),
    }

    // Build the engine and probe the model server
    let engine = Arc::new(RagEngine::new(config.clone())?);

    let (embedding_ok, generation_ok) = engine.provider_health().await;
    if embedding_ok && generation_ok {
        tracing::info!("Ollama is running at {}", config.llm.base_url);
    } else {
        tracing::warn!("Ollama not available at {}", config.llm.base_url);
        tracing::warn!("Please start Ollama:");
        tracing::warn!("  1. Install: brew install ollama");
        tracing::warn!("  2. Start: ollama serve");
        tracing::warn!(
            "  3. Pull models: ollama pull {} && ollama pull {}",
            config.llm.embed_model,
            config.llm.generate_model
        );
    }

    // Create and start the server
    let server = RagServer::new(config, engine);

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/query        - Ask a research question");
    println!("  GET  /api/stats        - Index statistics");
    println!("  GET  /api/sample-query - Sample research question");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
