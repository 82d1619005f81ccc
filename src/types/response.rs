//! Response types for RAG queries

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::paper::{abstract_of, Paper, PaperMetadata};

/// A retrieved paper with its relevance score. Transient: scoped to one
/// query's response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPaper {
    /// Paper identifier
    pub id: String,
    /// Raw text body of the paper
    pub document_text: String,
    /// Bibliographic metadata
    pub metadata: PaperMetadata,
    /// Relevance score (higher is more relevant)
    pub score: f32,
}

impl ScoredPaper {
    /// Create a scored paper from a corpus paper
    pub fn from_paper(paper: &Paper, score: f32) -> Self {
        Self {
            id: paper.id.clone(),
            document_text: paper.document_text.clone(),
            metadata: paper.metadata.clone(),
            score,
        }
    }

    /// The abstract portion of the document body
    pub fn abstract_text(&self) -> &str {
        abstract_of(&self.document_text)
    }
}

/// Result of one query: the composed answer plus the papers it was grounded
/// in, ordered by descending relevance. Immutable once produced; callers may
/// cache it across UI interactions, the engine does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// Generated answer text
    pub response: String,
    /// Supporting papers, score-descending
    pub papers: Vec<ScoredPaper>,
    /// Identifier for log correlation
    pub query_id: Uuid,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl QueryResult {
    /// Create a new query result
    pub fn new(response: String, papers: Vec<ScoredPaper>, processing_time_ms: u64) -> Self {
        Self {
            response,
            papers,
            query_id: Uuid::new_v4(),
            processing_time_ms,
        }
    }
}
