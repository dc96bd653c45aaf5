use std::sync::Arc;

use crate::config::Config;
use crate::spellcheck::pipeline::SpellCheckPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stateless between calls; shared so every request sees the same checker and weights.
    pub pipeline: Arc<SpellCheckPipeline>,
}
