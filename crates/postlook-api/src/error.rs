use thiserror::Error;

/// Top-level error type for the `postlook-api` crate.
///
/// Covers the transport-level failure modes of talking to the relay
/// endpoint. `postlook-core` classifies these into user-facing lookup
/// outcomes; nothing here is shown to an end user directly.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request exceeded the fixed per-lookup time budget.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Relay ───────────────────────────────────────────────────────
    /// The relay answered outside the 2xx range without a JSON envelope.
    #[error("Relay endpoint returned HTTP {status}")]
    Http { status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request never produced a usable envelope,
    /// i.e. the service should be treated as unavailable.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout { .. } => true,
            Self::Http { .. } | Self::Deserialization { .. } => true,
            Self::InvalidUrl(_) => false,
        }
    }

    /// Returns `true` if this error is the fixed time budget expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
