//! Engine context object wiring the query pipeline
//!
//! [`RagEngine`] is constructed once at process start and passed to request
//! handlers; it is never ambient state. Construction builds the providers,
//! creates the index, and loads the configured corpus snapshot.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::generation::ResponseComposer;
use crate::index::{snapshot, VectorIndex};
use crate::providers::ollama::{OllamaClient, OllamaEmbedder, OllamaGenerator};
use crate::providers::{EmbeddingProvider, GenerationProvider};
use crate::retrieval::{Retriever, VectorRetriever};
use crate::types::{QueryResult, ResponseStyle};

/// The query engine: embedder, index, retriever, and composer behind one
/// request/response surface.
pub struct RagEngine {
    config: RagConfig,
    index: Arc<VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn GenerationProvider>,
    retriever: Arc<dyn Retriever>,
    composer: ResponseComposer,
    started_at: DateTime<Utc>,
}

impl RagEngine {
    /// Initialize the engine from configuration: Ollama-backed providers, a
    /// fresh index, and the configured snapshot loaded into it.
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing query engine...");

        let client = Arc::new(OllamaClient::new(&config.llm)?);
        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(OllamaEmbedder::new(Arc::clone(&client), &config.embedding));
        let llm: Arc<dyn GenerationProvider> = Arc::new(OllamaGenerator::new(client, &config.llm));
        tracing::info!(
            "Providers initialized (embedding: {}, generation: {})",
            config.llm.embed_model,
            config.llm.generate_model
        );

        let index = Arc::new(VectorIndex::new(
            config.embedding.dimensions,
            config.index.metric,
        )?);

        match &config.index.snapshot_path {
            Some(path) => {
                let loaded = snapshot::load_snapshot(&index, path)?;
                tracing::info!("Loaded {} papers from snapshot {}", loaded, path.display());
            }
            None => {
                tracing::warn!("No corpus snapshot configured; index starts empty");
            }
        }

        Ok(Self::with_parts(config, index, embedder, llm))
    }

    /// Assemble an engine from pre-built parts. This is the injection point
    /// for alternative providers and for tests.
    pub fn with_parts(
        config: RagConfig,
        index: Arc<VectorIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn GenerationProvider>,
    ) -> Self {
        let retriever: Arc<dyn Retriever> =
            Arc::new(VectorRetriever::new(Arc::clone(&embedder), Arc::clone(&index)));
        let composer = ResponseComposer::new(Arc::clone(&llm), config.llm.context_chars_per_paper);

        Self {
            config,
            index,
            embedder,
            llm,
            retriever,
            composer,
            started_at: Utc::now(),
        }
    }

    /// Process one query end-to-end: validate, retrieve, compose.
    ///
    /// Validation happens before any embedding or index work: an empty query
    /// fails with an embedding error, a zero `top_k` with a config error.
    /// Pipeline errors propagate typed and unretried.
    pub async fn process_query(
        &self,
        query: &str,
        top_k: usize,
        style: ResponseStyle,
    ) -> Result<QueryResult> {
        let start = Instant::now();

        let query = query.trim();
        if query.is_empty() {
            return Err(Error::embedding("query text is empty"));
        }
        if top_k == 0 {
            return Err(Error::config("top_k must be at least 1"));
        }

        tracing::info!(
            "Query: \"{}\" (top_k={}, style={})",
            query,
            top_k,
            style.display_name()
        );

        let papers = self.retriever.retrieve(query, top_k).await?;
        let response = self.composer.compose(query, &papers, style).await?;

        let processing_time_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Query completed in {}ms with {} papers",
            processing_time_ms,
            papers.len()
        );

        Ok(QueryResult::new(response, papers, processing_time_ms))
    }

    /// Probe both model providers. Returns (embedding healthy, generation
    /// healthy); transport failures count as unhealthy.
    pub async fn provider_health(&self) -> (bool, bool) {
        let embedding = self.embedder.health_check().await.unwrap_or(false);
        let generation = self.llm.health_check().await.unwrap_or(false);
        (embedding, generation)
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Get the vector index
    pub fn index(&self) -> &Arc<VectorIndex> {
        &self.index
    }

    /// Engine start time
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Shut the engine down. The index is in-memory and the providers are
    /// stateless HTTP clients, so there is nothing to flush; dropping the
    /// engine after this call releases everything.
    pub fn shutdown(&self) {
        tracing::info!("Query engine shut down");
    }
}
