//! Shared application state

use std::sync::Arc;

use crate::engine::RagEngine;

/// Shared state handed to every request handler: a handle to the one engine
/// built at startup.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RagEngine>,
}

impl AppState {
    /// Wrap an engine for sharing across handlers
    pub fn new(engine: Arc<RagEngine>) -> Self {
        Self { engine }
    }

    /// Get the engine
    pub fn engine(&self) -> &Arc<RagEngine> {
        &self.engine
    }
}
