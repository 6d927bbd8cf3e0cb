// ── Country eligibility ──

/// Allow-list deciding whether lookup behavior is active for a country.
///
/// Pure; consulted on every country change and before every lookup
/// attempt. The default list contains only `"NL"` -- the validators and
/// the upstream service are specific to the Dutch postal format.
#[derive(Debug, Clone)]
pub struct EligibilityGate {
    supported: Vec<String>,
}

impl EligibilityGate {
    pub fn new(supported: Vec<String>) -> Self {
        Self { supported }
    }

    /// Whether the (trimmed) country code is eligible for lookup.
    pub fn is_eligible(&self, country_code: &str) -> bool {
        let code = country_code.trim();
        self.supported.iter().any(|c| c == code)
    }
}

impl Default for EligibilityGate {
    fn default() -> Self {
        Self::new(vec!["NL".into()])
    }
}
