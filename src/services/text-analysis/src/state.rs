//! Shared application state

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::cache::LemmaCache;
use crate::capabilities::Capabilities;
use crate::config::Config;
use crate::error::Result;
use crate::handler::TextAnalysisHandler;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub handler: Arc<TextAnalysisHandler>,
    pub sessions: Arc<SessionStore>,
    pub started_at: Instant,
}

impl AppState {
    /// State with the default capability providers
    pub fn new(config: Config) -> Result<Self> {
        info!("Initializing text analysis capabilities...");
        let capabilities = Capabilities::from_config(&config)?;
        Ok(Self::with_capabilities(config, capabilities))
    }

    /// State with caller supplied capabilities
    pub fn with_capabilities(config: Config, capabilities: Capabilities) -> Self {
        let cache = Arc::new(LemmaCache::new(config.cache.lemma_capacity));
        let handler = TextAnalysisHandler::new(
            capabilities,
            cache,
            config.translation.max_text_length,
        );
        let sessions = SessionStore::new(&config.sessions);

        Self {
            config: Arc::new(config),
            handler: Arc::new(handler),
            sessions: Arc::new(sessions),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
