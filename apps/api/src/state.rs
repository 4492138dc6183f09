use crate::analysis::analyzer::RelevanceAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no per-user data: every analysis outcome is owned by the request that produced it.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: RelevanceAnalyzer,
    pub config: Config,
}
