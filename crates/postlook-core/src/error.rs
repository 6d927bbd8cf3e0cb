// ── Core error types ──
//
// Lookup failures never surface here: they are absorbed by the
// controller and turned into form messages (see `model::FailureReason`).
// CoreError covers construction and configuration problems only.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<postlook_api::Error> for CoreError {
    fn from(err: postlook_api::Error) -> Self {
        match err {
            postlook_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid endpoint URL: {e}"),
            },
            other => CoreError::Internal(other.to_string()),
        }
    }
}
