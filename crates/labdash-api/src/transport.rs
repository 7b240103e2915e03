// Transport settings for the commander client's reqwest::Client.
//
// Native builds (tests, server-side tools) get a timeout and user agent.
// In the browser the page's fetch owns both, so the builder stays bare.

use std::time::Duration;

use crate::error::Error;

#[cfg(not(target_arch = "wasm32"))]
const USER_AGENT: &str = concat!("labdash/", env!("CARGO_PKG_VERSION"));

/// Timeout and client settings applied when the commander client is built.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout. Ignored on `wasm32`.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Build(e.to_string()))
    }

    /// Build a `reqwest::Client` from this config.
    #[cfg(target_arch = "wasm32")]
    #[allow(clippy::unused_self)]
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Build(e.to_string()))
    }
}
