use crate::config::Config;
use crate::extraction::BuffExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The single extraction pipeline. Its unit scale is fixed at startup so
    /// every record the service aggregates shares one convention.
    pub extractor: BuffExtractor<'static>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let extractor = BuffExtractor::with_default_triggers(config.unit_scale);
        Self { config, extractor }
    }
}
