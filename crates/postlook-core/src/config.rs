// ── Controller configuration ──
//
// A LookupConfig is handed to each controller instance at construction.
// There is no global registry: billing and shipping controllers receive
// their own copies and never look anything up at runtime.

use std::time::Duration;

use url::Url;

use crate::form::FieldGroupConfig;

/// User-facing message strings, one per failure class.
///
/// Hosts pass translated strings; the defaults are English. Exactly one
/// message is visible at a time -- the controller replaces, never appends.
#[derive(Debug, Clone)]
pub struct Messages {
    /// Lookup succeeded technically but matched no address (`ZERO_RESULTS`).
    pub invalid_address: String,
    /// The relay or upstream rejected the query (`INVALID_REQUEST`).
    pub invalid_postal_code_or_street_number: String,
    /// Blur-time format error on the street number field.
    pub invalid_street_number: String,
    /// Blur-time format error on the suffix field.
    pub invalid_street_number_suffix: String,
    /// Blur-time format error on the postcode field.
    pub invalid_postal_code: String,
    /// Service unusable (`UNAVAILABLE` / `ACCESS_RESTRICTED`).
    pub unknown_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            invalid_address: "No address found for this postcode and street number.".into(),
            invalid_postal_code_or_street_number: "Invalid postcode or street number.".into(),
            invalid_street_number: "Invalid street number format.".into(),
            invalid_street_number_suffix: "Invalid street number suffix format.".into(),
            invalid_postal_code: "Invalid postcode format.".into(),
            unknown_error: "An unknown error occurred, please fill in the address manually."
                .into(),
        }
    }
}

/// Configuration for a single lookup controller instance.
///
/// Built by the host (or the CLI) and passed to
/// [`LookupController::new`](crate::LookupController::new) -- core never
/// reads config files.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Relay endpoint URL.
    pub endpoint: Url,
    /// The address field group this controller drives; host adapters
    /// resolve roles to concrete elements through it.
    pub field_group: FieldGroupConfig,
    /// Action discriminator sent as the `action` query parameter.
    pub action: String,
    /// Country codes for which automated lookup is offered.
    pub supported_countries: Vec<String>,
    /// Trailing-edge debounce window for keystroke-triggered lookups.
    pub debounce: Duration,
    /// Fixed upper bound on each lookup round-trip.
    pub timeout: Duration,
    /// Translated message strings.
    pub messages: Messages,
}

impl LookupConfig {
    /// Config with the given endpoint and the standard defaults:
    /// billing field group, action `"lookup"`, countries `["NL"]`,
    /// 450 ms debounce, 5 s timeout.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            field_group: FieldGroupConfig::billing(),
            action: "lookup".into(),
            supported_countries: vec!["NL".into()],
            debounce: Duration::from_millis(450),
            timeout: Duration::from_secs(5),
            messages: Messages::default(),
        }
    }
}
