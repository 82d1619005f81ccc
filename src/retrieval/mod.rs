//! Retrieval seam: embed the query, search the index
//!
//! [`Retriever`] is the boundary where re-ranking, filtering, or hybrid
//! lexical+vector search would slot in later, independently of the embedder
//! and the index.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::index::VectorIndex;
use crate::providers::EmbeddingProvider;
use crate::types::ScoredPaper;

/// Trait for components that produce ranked papers for a query text
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Retrieve the `top_k` most relevant papers, score-descending.
    ///
    /// Propagates embedding and index errors unchanged and never retries;
    /// retry policy belongs to the caller.
    async fn retrieve(&self, query_text: &str, top_k: usize) -> Result<Vec<ScoredPaper>>;
}

/// Nearest-neighbor retriever over the vector index
pub struct VectorRetriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<VectorIndex>,
}

impl VectorRetriever {
    /// Create a retriever over the given embedder and index
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<VectorIndex>) -> Self {
        Self { embedder, index }
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    async fn retrieve(&self, query_text: &str, top_k: usize) -> Result<Vec<ScoredPaper>> {
        let embedding = self.embedder.embed(query_text).await?;
        self.index.query(&embedding, top_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::index::SimilarityMetric;
    use crate::types::{Paper, PaperMetadata};

    /// Deterministic embedder: maps each known word to a fixed axis
    struct AxisEmbedder;

    #[async_trait]
    impl EmbeddingProvider for AxisEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            match text {
                "alpha" => Ok(vec![1.0, 0.0]),
                "beta" => Ok(vec![0.0, 1.0]),
                _ => Ok(vec![0.7, 0.7]),
            }
        }

        fn dimensions(&self) -> usize {
            2
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "axis"
        }
    }

    fn corpus() -> Arc<VectorIndex> {
        let index = VectorIndex::new(2, SimilarityMetric::Cosine).unwrap();
        index
            .upsert(Paper::new("p-alpha", "alpha body", PaperMetadata::default()), vec![1.0, 0.0])
            .unwrap();
        index
            .upsert(Paper::new("p-beta", "beta body", PaperMetadata::default()), vec![0.0, 1.0])
            .unwrap();
        index
            .upsert(Paper::new("p-both", "both body", PaperMetadata::default()), vec![1.0, 1.0])
            .unwrap();
        Arc::new(index)
    }

    #[tokio::test]
    async fn retrieves_nearest_papers_in_order() {
        let retriever = VectorRetriever::new(Arc::new(AxisEmbedder), corpus());
        let results = retriever.retrieve("alpha", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "p-alpha");
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn underfilled_index_returns_fewer_results() {
        let retriever = VectorRetriever::new(Arc::new(AxisEmbedder), corpus());
        let results = retriever.retrieve("beta", 5).await.unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn embedding_errors_propagate_unchanged() {
        struct FailingEmbedder;

        #[async_trait]
        impl EmbeddingProvider for FailingEmbedder {
            async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
                Err(Error::embedding("model unavailable"))
            }

            fn dimensions(&self) -> usize {
                2
            }

            async fn health_check(&self) -> Result<bool> {
                Ok(false)
            }

            fn name(&self) -> &str {
                "failing"
            }
        }

        let retriever = VectorRetriever::new(Arc::new(FailingEmbedder), corpus());
        let err = retriever.retrieve("alpha", 1).await.unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
    }
}
