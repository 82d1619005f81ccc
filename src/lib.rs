//! scholar-rag: retrieval-augmented query engine for literature review
//!
//! This crate embeds a free-text research question, retrieves the most
//! relevant papers from a pre-populated vector index, and composes a
//! style-templated answer with a generation model. The HTTP server exposes
//! the pipeline to any client; retrieval and composition live in the engine,
//! not in the transport layer.

pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod index;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use engine::RagEngine;
pub use error::{Error, Result};
pub use types::{
    paper::{Paper, PaperMetadata},
    query::{QueryRequest, ResponseStyle},
    response::{QueryResult, ScoredPaper},
};
