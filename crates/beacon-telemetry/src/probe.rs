//! Network reachability probe
//!
//! A single short GET decides online/offline; any transport error or
//! non-success status counts as offline.

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Reachability probe against a fixed URL
#[derive(Debug, Clone)]
pub struct ReachabilityProbe {
    client: Client,
    url: String,
    timeout: Duration,
}

impl ReachabilityProbe {
    /// Create a probe with its own short-timeout client
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    /// Check whether the probe URL is reachable
    pub async fn is_reachable(&self) -> bool {
        debug!(url = %self.url, "Checking connectivity");

        match self.client.get(&self.url).timeout(self.timeout).send().await {
            Ok(response) => {
                let status = response.status();
                let reachable = status.is_success() || status.as_u16() == 204;
                debug!(url = %self.url, status = %status, reachable, "Connectivity check complete");
                reachable
            }
            Err(e) => {
                debug!(url = %self.url, error = %e, "Connectivity check failed");
                false
            }
        }
    }
}
