//! Client configuration: fixed backend host and per-request deadline.

use std::env;
use std::time::Duration;

/// Backend host every endpoint lives on.
pub const DEFAULT_BASE_URL: &str = "https://basededatos.gokucomdohd.pro";

/// Per-request deadline applied by the transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        // Env-overridable so operational knobs stay out of the API surface.
        let timeout_secs = env::var("MARDIFY_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT.as_secs());

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
