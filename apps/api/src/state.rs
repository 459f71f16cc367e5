use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::GenerativeModel;

/// Shared backend state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable model. Production: `LlmClient` (Gemini). Tests swap in a stub.
    pub llm: Arc<dyn GenerativeModel>,
    pub config: Config,
}
