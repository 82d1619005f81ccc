//! Paper types: the unit of retrievable content

use serde::{Deserialize, Serialize};

/// Bibliographic metadata attached to a paper. All fields are optional; the
/// corpus is only as complete as its source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperMetadata {
    /// Paper title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Author list as a single display string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    /// Originating archive or venue (e.g. "arXiv")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Publication date as a display string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Subject categories as a single display string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
}

/// A paper in the corpus. Created during ingestion (external to this crate)
/// and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Unique identifier
    pub id: String,
    /// Raw text body, typically formatted "Title: ...\nAbstract: ..."
    pub document_text: String,
    /// Bibliographic metadata
    #[serde(default)]
    pub metadata: PaperMetadata,
}

impl Paper {
    /// Create a new paper
    pub fn new(id: impl Into<String>, document_text: impl Into<String>, metadata: PaperMetadata) -> Self {
        Self {
            id: id.into(),
            document_text: document_text.into(),
            metadata,
        }
    }

    /// The abstract portion of the document body. Corpus documents are
    /// formatted "Title: ...\nAbstract: ..."; anything else is returned whole.
    pub fn abstract_text(&self) -> &str {
        abstract_of(&self.document_text)
    }
}

/// Extract the abstract portion from a "Title: ...\nAbstract: ..." body.
pub(crate) fn abstract_of(document_text: &str) -> &str {
    if document_text.contains("Title:") {
        if let Some((_, rest)) = document_text.split_once("Abstract:") {
            return rest.trim();
        }
    }
    document_text
}
