//! Index statistics and sample queries

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::index::SimilarityMetric;
use crate::server::state::AppState;

/// Index statistics reported to clients
#[derive(Debug, Serialize)]
pub struct IndexStats {
    /// Number of papers in the index
    pub papers_indexed: usize,
    /// Embedding dimensionality
    pub dimensions: usize,
    /// Similarity metric in use
    pub metric: SimilarityMetric,
    /// Engine start time
    pub started_at: DateTime<Utc>,
}

/// GET /api/stats - index size and configuration
pub async fn index_stats(State(state): State<AppState>) -> Json<IndexStats> {
    let engine = state.engine();
    let index = engine.index();

    Json(IndexStats {
        papers_indexed: index.len(),
        dimensions: index.dimensions(),
        metric: index.metric(),
        started_at: engine.started_at(),
    })
}

/// Canned research questions clients can offer as examples
const SAMPLE_QUERIES: [&str; 6] = [
    "What are the latest advancements in transformer models for natural language processing?",
    "How is reinforcement learning being applied to robotics?",
    "Compare supervised and unsupervised learning approaches for image classification.",
    "What are the ethical considerations in developing AI for healthcare applications?",
    "How are graph neural networks used for recommendation systems?",
    "What are the current challenges in federated learning?",
];

/// GET /api/sample-query - a rotating sample research question
pub async fn sample_query() -> Json<serde_json::Value> {
    let idx = (Utc::now().timestamp() as usize) % SAMPLE_QUERIES.len();
    Json(json!({ "query": SAMPLE_QUERIES[idx] }))
}
