//! Widget configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL; None selects the built-in mock responder
    pub api_base: Option<String>,
    /// Authenticated user forwarded to the backend, if any
    pub user_id: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Simulated latency of the mock responder in milliseconds
    pub mock_latency_ms: u64,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: None,
            user_id: None,
            request_timeout_secs: 12,
            mock_latency_ms: 1500,
        }
    }
}
