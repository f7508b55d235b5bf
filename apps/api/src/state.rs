use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::llm_client::{CompletionGateway, LlmClient};
use crate::narration::NarrationCache;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    pub sessions: SessionStore,
    pub narration_cache: Arc<Mutex<NarrationCache>>,
}

impl AppState {
    /// The abstract completion capability handed to interviewers, scorers,
    /// and the aggregator. Everything downstream of this call sees only the
    /// trait, never the concrete client.
    pub fn gateway(&self) -> Arc<dyn CompletionGateway> {
        Arc::new(self.llm.clone())
    }
}
