// ── Dutch address format validation ──
//
// Three independent pure checks over raw field input. Postcode and
// street number are mandatory precursors to a lookup; the suffix is
// optional and never blocks a lookup by itself.
//
// Rust's regex engine has no lookahead, so the reserved postcode letter
// pairs (SA, SD, SS -- never issued, they collide with wartime
// abbreviations) are rejected by capturing the pair and comparing, which
// accepts exactly the same language as the original lookahead pattern.

use std::sync::LazyLock;

use regex::Regex;

static POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[1-9][0-9]{3}\s*([a-z]{2})$").expect("hard-coded pattern compiles")
});

static STREET_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,5}$").expect("hard-coded pattern compiles"));

static STREET_NUMBER_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z])?(?:\s?[a-z0-9]{1,4})?$").expect("hard-coded pattern compiles")
});

const RESERVED_PAIRS: [&str; 3] = ["SA", "SD", "SS"];

/// Outcome of a single field check.
///
/// `Incomplete` is the "not yet valid" case: the user has not finished
/// typing, so lookup is withheld silently with no error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Incomplete,
    Invalid,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

/// Dutch postcode: four digits (first nonzero), optional whitespace, two
/// letters, case-insensitive, excluding the reserved pairs SA/SD/SS.
pub fn postal_code(raw: &str) -> Validity {
    if raw.is_empty() {
        return Validity::Incomplete;
    }

    let Some(captures) = POSTAL_CODE.captures(raw) else {
        return Validity::Invalid;
    };

    let pair = &captures[1];
    if RESERVED_PAIRS.iter().any(|r| pair.eq_ignore_ascii_case(r)) {
        Validity::Invalid
    } else {
        Validity::Valid
    }
}

/// Street number: one to five ASCII digits, no sign, no decimal.
pub fn street_number(raw: &str) -> Validity {
    if raw.is_empty() {
        Validity::Incomplete
    } else if STREET_NUMBER.is_match(raw) {
        Validity::Valid
    } else {
        Validity::Invalid
    }
}

/// Street number suffix: at most one letter plus up to four
/// alphanumerics, optionally space-separated. Empty is always valid --
/// the suffix is optional.
pub fn street_number_suffix(raw: &str) -> Validity {
    if STREET_NUMBER_SUFFIX.is_match(raw) {
        Validity::Valid
    } else {
        Validity::Invalid
    }
}
