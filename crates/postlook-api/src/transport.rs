// Transport configuration for building reqwest::Client instances.
//
// The lookup flow runs on a fixed per-request time budget: a slow
// relay is treated the same as an unreachable one, so the timeout
// lives here rather than on individual calls.

use std::time::Duration;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Upper bound on each lookup round-trip.
    pub timeout: Duration,
    /// Version strings joined into the User-Agent header.
    pub version_strings: Vec<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            version_strings: vec![format!("postlook/{}", env!("CARGO_PKG_VERSION"))],
        }
    }
}

impl TransportConfig {
    /// Append a version string (whitespace collapsed to `-`).
    pub fn with_version_string(mut self, version_string: &str) -> Self {
        let cleaned: String = version_string
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        self.version_strings.push(cleaned);
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.version_strings.join(" "))
            .build()
            .map_err(crate::error::Error::Transport)
    }
}
