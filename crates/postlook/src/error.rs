//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const UNAVAILABLE: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("No relay endpoint configured")]
    #[diagnostic(
        code(postlook::no_endpoint),
        help(
            "Pass --endpoint, set POSTLOOK_ENDPOINT, or add `endpoint = \"…\"`\n\
             to your postlook config file."
        )
    )]
    NoEndpoint,

    #[error("Invalid endpoint URL: {value}")]
    #[diagnostic(code(postlook::invalid_endpoint))]
    InvalidEndpoint { value: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(postlook::config))]
    Config { message: String },

    #[error("Country {country} is not eligible for lookup")]
    #[diagnostic(
        code(postlook::ineligible_country),
        help("Only the configured countries (default: NL) support automated lookup.")
    )]
    IneligibleCountry { country: String },

    #[error("Invalid input: {message}")]
    #[diagnostic(code(postlook::invalid_input))]
    InvalidInput { message: String },

    #[error("Lookup failed: {message}")]
    #[diagnostic(code(postlook::lookup_failed))]
    LookupFailed { message: String, unavailable: bool },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoEndpoint | Self::InvalidEndpoint { .. } | Self::Config { .. } => {
                exit_code::GENERAL
            }
            Self::IneligibleCountry { .. } | Self::InvalidInput { .. } => exit_code::USAGE,
            Self::LookupFailed { unavailable, .. } => {
                if *unavailable {
                    exit_code::UNAVAILABLE
                } else {
                    exit_code::NOT_FOUND
                }
            }
        }
    }
}
