//! Configuration for the query engine

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::index::SimilarityMetric;

/// Main engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Embedding configuration
    pub embedding: EmbeddingConfig,
    /// Generation model configuration
    pub llm: LlmConfig,
    /// Vector index configuration
    pub index: IndexConfig,
}

impl RagConfig {
    /// Load configuration from an optional TOML file, then apply environment
    /// overrides. With no file, starts from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config: Self = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .map_err(|e| Error::config(format!("cannot read {}: {}", p.display(), e)))?;
                toml::from_str(&raw)
                    .map_err(|e| Error::config(format!("invalid config {}: {}", p.display(), e)))?
            }
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Resolve the config location: `SCHOLAR_RAG_CONFIG` if set, otherwise a
    /// `scholar-rag.toml` in the working directory if one exists.
    pub fn load_default() -> Result<Self> {
        if let Ok(path) = std::env::var("SCHOLAR_RAG_CONFIG") {
            return Self::load(Some(Path::new(&path)));
        }
        let local = Path::new("scholar-rag.toml");
        if local.exists() {
            Self::load(Some(local))
        } else {
            Self::load(None)
        }
    }

    /// Environment overrides for endpoints, models, and paths
    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("OLLAMA_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("SCHOLAR_RAG_EMBED_MODEL") {
            self.llm.embed_model = v;
        }
        if let Ok(v) = std::env::var("SCHOLAR_RAG_GENERATE_MODEL") {
            self.llm.generate_model = v;
        }
        if let Ok(v) = std::env::var("SCHOLAR_RAG_SNAPSHOT") {
            self.index.snapshot_path = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("SCHOLAR_RAG_PORT") {
            if let Ok(port) = v.parse() {
                self.server.port = port;
            }
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding dimensions (768 for nomic-embed-text)
    pub dimensions: usize,
    /// Maximum input length in characters accepted by the embedder.
    /// The true token limit lives in the model server; this is the
    /// enforceable client-side bound.
    pub max_input_chars: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: 768,
            max_input_chars: 8192,
        }
    }
}

/// Generation model (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Per-paper character budget when building prompt context
    pub context_chars_per_paper: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            generate_model: "phi3".to_string(),
            temperature: 0.3,
            timeout_secs: 120,
            context_chars_per_paper: 2000,
        }
    }
}

/// Vector index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Path to the pre-embedded corpus snapshot (JSON lines). When unset the
    /// index starts empty.
    pub snapshot_path: Option<PathBuf>,
    /// Similarity metric, fixed for the lifetime of the index
    pub metric: SimilarityMetric,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            snapshot_path: dirs::data_local_dir()
                .map(|d| d.join("scholar-rag").join("papers.jsonl"))
                .filter(|p| p.exists()),
            metric: SimilarityMetric::Cosine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = RagConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.embedding.dimensions, 768);
        assert_eq!(config.index.metric, SimilarityMetric::Cosine);
        assert!(config.llm.timeout_secs > 0);
    }

    #[test]
    fn partial_toml_fills_from_defaults() {
        let config: RagConfig = toml::from_str(
            r#"
            [llm]
            generate_model = "llama3.2:3b"

            [embedding]
            dimensions = 384
            "#,
        )
        .unwrap();
        assert_eq!(config.llm.generate_model, "llama3.2:3b");
        assert_eq!(config.llm.base_url, "http://localhost:11434");
        assert_eq!(config.embedding.dimensions, 384);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn env_overrides_apply() {
        std::env::set_var("SCHOLAR_RAG_GENERATE_MODEL", "mistral");
        std::env::set_var("SCHOLAR_RAG_PORT", "9191");
        let config = RagConfig::load(None).unwrap();
        assert_eq!(config.llm.generate_model, "mistral");
        assert_eq!(config.server.port, 9191);
        std::env::remove_var("SCHOLAR_RAG_GENERATE_MODEL");
        std::env::remove_var("SCHOLAR_RAG_PORT");
    }
}
