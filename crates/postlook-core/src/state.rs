// ── Controller state ──

/// Controller state observable by consumers.
///
/// Transitions happen only inside [`LookupController`](crate::LookupController)
/// methods and are published on a `watch` channel. `Disabled` means the
/// selected country is ineligible: edit events are inert, fields are
/// unlocked. Every other state is re-entrant on further edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupState {
    /// Country ineligible; lookup machinery detached.
    Disabled,
    /// Eligible, nothing typed yet.
    Idle,
    /// Edits received; lookup pending validation or debounce.
    AwaitingInput,
    /// Request in flight; inputs disabled, busy indicator on.
    Loading,
    /// Last lookup succeeded and the derived fields are populated.
    Filled,
    /// Last lookup failed; the message slot is showing why.
    Failed,
}

impl LookupState {
    /// Whether the lookup machinery is engaged at all.
    pub fn is_active(self) -> bool {
        self != Self::Disabled
    }

    /// Whether a terminal outcome (success or failure) has been reached.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Filled | Self::Failed)
    }
}
