// ── Domain model ──
//
// Canonical lookup outcomes, decoupled from the wire envelope. The
// controller and cache only ever see these types; `classify` is the one
// place wire shapes are interpreted.

use postlook_api::AddressRow;

/// Why a lookup did not produce an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Well-formed query, but no matching address exists.
    ZeroResults,
    /// The relay or upstream rejected the query parameters.
    InvalidRequest,
    /// Transport failure, timeout, or malformed envelope.
    Unavailable,
    /// The relay refused the request origin.
    AccessRestricted,
}

impl FailureReason {
    /// Map an envelope `status_code` string. Unknown codes collapse to
    /// `Unavailable` -- the user can do nothing more specific about them.
    pub fn from_status_code(code: &str) -> Self {
        match code {
            "ZERO_RESULTS" => Self::ZeroResults,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "ACCESS_RESTRICTED" => Self::AccessRestricted,
            _ => Self::Unavailable,
        }
    }

    /// Whether this failure means the service is unusable for the
    /// session, so the field lock should be released for manual entry.
    pub fn releases_lock(self) -> bool {
        matches!(self, Self::Unavailable | Self::AccessRestricted)
    }
}

/// A resolved address from the first result row.
///
/// The service normalizes the query fields and reflects them back; those
/// are carried along so the controller can write canonical values into
/// the input fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub street_name: Option<String>,
    pub city: Option<String>,
    pub state_abbreviation: Option<String>,
    pub postal_code: Option<String>,
    pub street_number: Option<String>,
    pub street_number_suffix: Option<String>,
}

impl ResolvedAddress {
    /// Street number and suffix joined into the single display number a
    /// checkout ultimately posts (e.g. `23` + `a` -> `23a`).
    pub fn display_number(&self) -> String {
        let number = self.street_number.as_deref().unwrap_or_default();
        let suffix = self.street_number_suffix.as_deref().unwrap_or_default();
        format!("{number}{suffix}")
    }
}

impl From<&AddressRow> for ResolvedAddress {
    fn from(row: &AddressRow) -> Self {
        Self {
            street_name: row.street_name.clone(),
            city: row.city.clone(),
            state_abbreviation: row.state_abbreviation().map(str::to_owned),
            postal_code: row.postal_code.clone(),
            street_number: row.street_number.clone(),
            street_number_suffix: row.street_number_suffix.clone(),
        }
    }
}

/// Outcome of one lookup attempt, as stored in the cache and applied to
/// the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Success(ResolvedAddress),
    Failure(FailureReason),
}
