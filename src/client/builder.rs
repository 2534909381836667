use std::sync::Arc;
use std::time::Duration;

use crate::client::core::MardifyClient;
use crate::config::ClientConfig;
use crate::session::{MemorySessionStore, SessionHandle, SessionStore};
use crate::transport::HttpTransport;
use crate::Result;

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable (developer-friendly).
pub struct MardifyClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    session_store: Option<Arc<dyn SessionStore>>,
}

impl MardifyClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            session_store: None,
        }
    }

    /// Override the backend host (primarily for testing with mock servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the per-request deadline (default 30 s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Inject the session store. Default is an in-memory store.
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<MardifyClient> {
        let mut config = ClientConfig::default();
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }

        let store = self
            .session_store
            .unwrap_or_else(|| Arc::new(MemorySessionStore::new()));
        let transport = Arc::new(HttpTransport::new(&config)?);

        Ok(MardifyClient {
            transport,
            session: SessionHandle::new(store),
        })
    }
}

impl Default for MardifyClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
