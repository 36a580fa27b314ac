//! Shared application state passed to every handler.

use prometheus::{IntCounterVec, Opts, Registry};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::pdf::{PandocEngine, Renderer};

/// Explicitly constructed handler context: configuration, the renderer seam
/// and the generation counter. Built once at startup and cloned into the
/// actix workers; nothing here is process-global.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub renderer: Arc<dyn Renderer>,
    pub pdf_counter: IntCounterVec,
}

impl AppState {
    /// Production state: pandoc engine plus a counter registered into the
    /// metrics registry exposed at `/metrics`.
    pub fn new(config: AppConfig, registry: &Registry) -> Result<Self, prometheus::Error> {
        let renderer = Arc::new(PandocEngine::new(&config));
        let state = Self::with_renderer(config, renderer)?;
        registry.register(Box::new(state.pdf_counter.clone()))?;
        Ok(state)
    }

    /// State with a caller-supplied renderer; the counter stays unregistered.
    /// Used by tests to substitute a mock renderer.
    pub fn with_renderer(
        config: AppConfig,
        renderer: Arc<dyn Renderer>,
    ) -> Result<Self, prometheus::Error> {
        let pdf_counter = IntCounterVec::new(
            Opts::new("pdf_generation_total", "Total number of pdfs generated"),
            &["endpoint"],
        )?;
        Ok(Self {
            config,
            renderer,
            pdf_counter,
        })
    }
}
