// Wire types for the relay endpoint.
//
// The relay forwards the upstream geocoding response verbatim, so these
// shapes mirror the upstream JSON envelope. Every row field is optional
// at the serde level -- upstream omits fields freely and the consumer
// only ever reads what is present in `results[0]`.

use serde::{Deserialize, Serialize};

/// The query triple sent to the relay endpoint.
///
/// Two requests are considered the same lookup when their [`normalized`]
/// forms are equal; that normalized form is what response caches key on.
///
/// [`normalized`]: LookupRequest::normalized
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupRequest {
    pub postal_code: String,
    pub street_number: String,
    pub street_number_suffix: String,
}

impl LookupRequest {
    pub fn new(
        postal_code: impl Into<String>,
        street_number: impl Into<String>,
        street_number_suffix: impl Into<String>,
    ) -> Self {
        Self {
            postal_code: postal_code.into(),
            street_number: street_number.into(),
            street_number_suffix: street_number_suffix.into(),
        }
    }

    /// Canonical form of the request: postal code uppercased with internal
    /// whitespace removed, number and suffix trimmed.
    ///
    /// `"2611 kl"` and `"2611KL"` address the same street, so they must
    /// resolve to the same cache entry.
    pub fn normalized(&self) -> Self {
        Self {
            postal_code: self
                .postal_code
                .split_whitespace()
                .collect::<String>()
                .to_ascii_uppercase(),
            street_number: self.street_number.trim().to_owned(),
            street_number_suffix: self.street_number_suffix.trim().to_owned(),
        }
    }
}

/// Envelope status discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStatus {
    Ok,
    Failed,
}

/// One administrative area (province) attached to a result row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdministrativeArea {
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A single resolved address row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressRow {
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub street_number_suffix: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub administrative_areas: Vec<AdministrativeArea>,
}

impl AddressRow {
    /// Abbreviation of the first administrative area, if any.
    pub fn state_abbreviation(&self) -> Option<&str> {
        self.administrative_areas
            .first()
            .and_then(|area| area.abbreviation.as_deref())
    }
}

/// The JSON envelope returned by the relay.
///
/// On `status: "failed"` the relay (or upstream) sets `status_code` to a
/// machine-readable reason such as `ZERO_RESULTS`, `INVALID_REQUEST`,
/// `UNAVAILABLE`, or `ACCESS_RESTRICTED`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupEnvelope {
    pub status: LookupStatus,
    #[serde(default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub results: Vec<AddressRow>,
}

impl LookupEnvelope {
    /// The first result row; anything past index 0 is never read.
    pub fn first_result(&self) -> Option<&AddressRow> {
        self.results.first()
    }
}
