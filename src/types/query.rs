//! Query request types

use serde::{Deserialize, Serialize};

/// Response style selecting the instruction template used during composition.
///
/// Adding a style means adding a variant and its row in [`instruction`] /
/// [`display_name`]; composition logic never branches on styles elsewhere.
///
/// [`instruction`]: ResponseStyle::instruction
/// [`display_name`]: ResponseStyle::display_name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStyle {
    /// Neutral analytic answer
    #[default]
    General,
    /// Condensed multi-paper summary
    Summary,
    /// Structured comparison across papers
    Comparison,
    /// Forward-looking research-gaps analysis
    FutureResearch,
}

impl ResponseStyle {
    /// All styles, in wire order
    pub const ALL: [ResponseStyle; 4] = [
        Self::General,
        Self::Summary,
        Self::Comparison,
        Self::FutureResearch,
    ];

    /// Instruction template injected into the generation prompt
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::General => {
                "Provide a clear, analytic answer to the research question, \
                 grounded in the papers below. State what the literature \
                 supports and where it is inconclusive."
            }
            Self::Summary => {
                "Provide a condensed summary that synthesizes the findings of \
                 the papers below into a single coherent overview of the \
                 research area."
            }
            Self::Comparison => {
                "Provide a structured comparison across the papers below: \
                 their approaches, key findings, and where they agree or \
                 disagree. Organize the comparison by theme, not by paper."
            }
            Self::FutureResearch => {
                "Identify the research gaps left open by the papers below and \
                 propose promising future research directions, each tied to \
                 the limitations that motivate it."
            }
        }
    }

    /// Human-readable name for logs and clients
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::General => "General Response",
            Self::Summary => "Comprehensive Summary",
            Self::Comparison => "Comparison Analysis",
            Self::FutureResearch => "Future Research Directions",
        }
    }
}

/// Query request for the RAG pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The research question
    pub query: String,

    /// Number of papers to retrieve (default: 5)
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Response style (default: general)
    #[serde(default)]
    pub response_type: ResponseStyle,
}

fn default_top_k() -> usize {
    5
}

impl QueryRequest {
    /// Create a new request with default settings
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: default_top_k(),
            response_type: ResponseStyle::default(),
        }
    }

    /// Set the number of papers to retrieve
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Set the response style
    pub fn with_style(mut self, style: ResponseStyle) -> Self {
        self.response_type = style;
        self
    }
}
