//! Provider abstractions for the embedding and generation models
//!
//! Both models are opaque external services reached over whatever transport
//! their provider requires; these traits are the seams the engine is wired
//! through.

pub mod ollama;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating text embeddings.
///
/// Implementations are deterministic for a fixed model version: the same text
/// yields the same vector up to floating-point tolerance.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text.
    ///
    /// Fails with [`Error::Embedding`] when the text is empty or exceeds the
    /// model input limit.
    ///
    /// [`Error::Embedding`]: crate::error::Error::Embedding
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    ///
    /// Default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Embedding dimensionality produced by this provider
    fn dimensions(&self) -> usize;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Trait for LLM-based text generation
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for a fully built prompt.
    ///
    /// Fails with [`Error::Generation`] on model invocation failure and
    /// [`Error::GenerationTimeout`] when the configured timeout elapses. No
    /// retries happen here; retry policy belongs to the caller.
    ///
    /// [`Error::Generation`]: crate::error::Error::Generation
    /// [`Error::GenerationTimeout`]: crate::error::Error::GenerationTimeout
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier used for generation
    fn model(&self) -> &str;
}
