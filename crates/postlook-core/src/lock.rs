// ── Field lock policy ──
//
// While lookup is authoritative the derived fields (street, city, state)
// are read-only, the state field is hidden from direct view, and the
// postcode input is length-constrained. The lock is applied when the
// country becomes eligible and released when it becomes ineligible or
// the service proves unusable for the session.

use crate::form::{AddressForm, FieldRole};

/// Applies and reverses the derived-field lock.
#[derive(Debug, Clone)]
pub struct FieldLockPolicy {
    /// Max postcode input length while locked ("1234 AB" is 7 chars).
    pub postcode_max_length: u32,
}

impl Default for FieldLockPolicy {
    fn default() -> Self {
        Self {
            postcode_max_length: 7,
        }
    }
}

impl FieldLockPolicy {
    /// Mark derived fields non-freely-editable and constrain the
    /// postcode input.
    pub fn apply(&self, form: &dyn AddressForm) {
        form.set_max_length(FieldRole::PostalCode, Some(self.postcode_max_length));

        for role in FieldRole::DERIVED {
            form.set_read_only(role, true);
        }

        form.set_visible(FieldRole::State, false);
    }

    /// Reverse everything [`apply`](Self::apply) did.
    pub fn release(&self, form: &dyn AddressForm) {
        form.set_max_length(FieldRole::PostalCode, None);

        for role in FieldRole::DERIVED {
            form.set_read_only(role, false);
        }

        form.set_visible(FieldRole::State, true);
    }
}
