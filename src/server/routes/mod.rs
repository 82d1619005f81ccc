//! API routes for the query server

pub mod query;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Query
        .route("/query", post(query::process_query))
        // Index statistics
        .route("/stats", get(stats::index_stats))
        // Sample research questions
        .route("/sample-query", get(stats::sample_query))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "scholar-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Literature-review RAG engine with vector retrieval and styled answers",
        "endpoints": {
            "POST /api/query": "Ask a research question",
            "GET /api/stats": "Index size and configuration",
            "GET /api/sample-query": "A rotating sample research question",
            "GET /api/info": "This document"
        },
        "response_types": ["general", "summary", "comparison", "future_research"],
    }))
}
