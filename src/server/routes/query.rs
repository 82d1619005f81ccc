//! Query endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{QueryRequest, QueryResult};

/// POST /api/query - run the full query pipeline
pub async fn process_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResult>> {
    let result = state
        .engine()
        .process_query(&request.query, request.top_k, request.response_type)
        .await?;

    Ok(Json(result))
}
