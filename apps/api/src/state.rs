use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. The LLM client is an explicitly constructed dependency,
/// never process-wide state.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Full runtime settings, retained for handlers that need them.
    #[allow(dead_code)]
    pub config: Config,
}
