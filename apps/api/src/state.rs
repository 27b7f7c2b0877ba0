use std::sync::Arc;

use crate::analysis::service::AnalysisService;
use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::users::repository::UserRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Trained scorer and career matcher. Read-only once serving starts.
    pub analysis: Arc<AnalysisService>,
    /// Pluggable document-to-text backend. Default: DocumentTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    pub users: Arc<dyn UserRepository>,
}
