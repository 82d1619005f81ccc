//! Ollama-backed providers for embeddings and generation
//!
//! A single HTTP client is shared by both providers. Requests are made once;
//! a timeout surfaces as a typed error for the caller to act on.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{EmbeddingConfig, LlmConfig};
use crate::error::{Error, Result};

use super::{EmbeddingProvider, GenerationProvider};

/// Ollama API client
pub struct OllamaClient {
    client: Client,
    config: LlmConfig,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Check if Ollama is reachable
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.config.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Generate an embedding for the given text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.config.base_url);
        let request = EmbedRequest {
            model: self.config.embed_model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("embedding request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::embedding(format!(
                "embedding failed: HTTP {}",
                response.status()
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("failed to parse embedding response: {e}")))?;

        Ok(embed_response.embedding)
    }

    /// Generate text for a prompt
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = GenerateRequest {
            model: self.config.generate_model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
            },
        };

        tracing::info!("Generating answer with model: {}", self.config.generate_model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::GenerationTimeout(self.config.timeout_secs)
                } else {
                    Error::generation(format!("generation request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::generation(format!(
                "generation failed: HTTP {status} - {body}"
            )));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::generation(format!("failed to parse generation response: {e}")))?;

        Ok(generate_response.response)
    }
}

/// Embedding provider backed by an Ollama embedding model
pub struct OllamaEmbedder {
    client: Arc<OllamaClient>,
    dimensions: usize,
    max_input_chars: usize,
}

impl OllamaEmbedder {
    /// Create an embedder sharing an existing client
    pub fn new(client: Arc<OllamaClient>, config: &EmbeddingConfig) -> Self {
        Self {
            client,
            dimensions: config.dimensions,
            max_input_chars: config.max_input_chars,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::embedding("input text is empty"));
        }
        if text.chars().count() > self.max_input_chars {
            return Err(Error::embedding(format!(
                "input text exceeds the {}-character model limit",
                self.max_input_chars
            )));
        }

        let embedding = self.client.embed(text).await?;
        if embedding.len() != self.dimensions {
            return Err(Error::embedding(format!(
                "model returned {} dimensions, expected {}",
                embedding.len(),
                self.dimensions
            )));
        }
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Generation provider backed by an Ollama chat model
pub struct OllamaGenerator {
    client: Arc<OllamaClient>,
    model: String,
}

impl OllamaGenerator {
    /// Create a generator sharing an existing client
    pub fn new(client: Arc<OllamaClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            model: config.generate_model.clone(),
        }
    }
}

#[async_trait]
impl GenerationProvider for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.client.generate(prompt).await
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedder(max_input_chars: usize) -> OllamaEmbedder {
        let llm = LlmConfig::default();
        let config = EmbeddingConfig {
            dimensions: 4,
            max_input_chars,
        };
        OllamaEmbedder::new(Arc::new(OllamaClient::new(&llm).unwrap()), &config)
    }

    #[tokio::test]
    async fn empty_text_is_rejected_before_any_request() {
        let err = embedder(100).embed("   ").await.unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
    }

    #[tokio::test]
    async fn overlong_text_is_rejected_before_any_request() {
        let err = embedder(5).embed("too long for the limit").await.unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
        assert!(err.to_string().contains("5-character"));
    }
}
