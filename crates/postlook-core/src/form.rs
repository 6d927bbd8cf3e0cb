// ── Host form abstraction ──
//
// The controller reads and writes externally-owned input fields. It
// assumes nothing about them beyond: a field holds a string value, can
// be disabled / marked read-only / hidden / length-constrained, and can
// raise a change notification. Each field group additionally exposes one
// message slot and one busy indicator.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Logical role of an input field within one address field group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Country,
    State,
    City,
    Street,
    PostalCode,
    StreetNumber,
    StreetNumberSuffix,
}

impl FieldRole {
    /// The three fields the user types the lookup query into.
    pub const INPUTS: [FieldRole; 3] = [
        FieldRole::PostalCode,
        FieldRole::StreetNumber,
        FieldRole::StreetNumberSuffix,
    ];

    /// The fields the lookup derives and locks.
    pub const DERIVED: [FieldRole; 3] = [FieldRole::Street, FieldRole::City, FieldRole::State];

    /// Whether this role is one of the query input fields.
    pub fn is_input(self) -> bool {
        Self::INPUTS.contains(&self)
    }
}

/// Opaque locator for a host form element (e.g. a CSS selector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelector(pub String);

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable per-controller map of logical role to host element locator.
///
/// Supplied once at construction; the host adapter uses it to resolve
/// concrete elements, core only carries it through.
#[derive(Debug, Clone)]
pub struct FieldGroupConfig {
    pub prefix: String,
    selectors: HashMap<FieldRole, FieldSelector>,
}

impl FieldGroupConfig {
    /// Build a group from a prefix, deriving `#<prefix>_<field>` selectors.
    ///
    /// Street number and suffix ride in the second and third address
    /// lines, matching how checkout forms commonly lay these out.
    pub fn with_prefix(prefix: &str) -> Self {
        let mut selectors = HashMap::new();
        let entries = [
            (FieldRole::Country, "country"),
            (FieldRole::State, "state"),
            (FieldRole::City, "city"),
            (FieldRole::PostalCode, "postcode"),
            (FieldRole::Street, "address_1"),
            (FieldRole::StreetNumber, "address_2"),
            (FieldRole::StreetNumberSuffix, "address_3"),
        ];
        for (role, suffix) in entries {
            selectors.insert(role, FieldSelector(format!("#{prefix}_{suffix}")));
        }

        Self {
            prefix: prefix.to_owned(),
            selectors,
        }
    }

    /// The standard billing field group.
    pub fn billing() -> Self {
        Self::with_prefix("billing")
    }

    /// The standard shipping field group.
    pub fn shipping() -> Self {
        Self::with_prefix("shipping")
    }

    /// Locator for the given role.
    pub fn selector(&self, role: FieldRole) -> Option<&FieldSelector> {
        self.selectors.get(&role)
    }
}

// ── AddressForm trait ───────────────────────────────────────────────

/// Seam between the controller and the host form.
///
/// Implementations are expected to use interior mutability (DOM handles,
/// UI widget references); all methods take `&self`.
pub trait AddressForm: Send + Sync {
    fn value(&self, role: FieldRole) -> String;
    fn set_value(&self, role: FieldRole, value: &str);
    fn set_read_only(&self, role: FieldRole, read_only: bool);
    fn set_disabled(&self, role: FieldRole, disabled: bool);
    fn set_visible(&self, role: FieldRole, visible: bool);
    fn set_max_length(&self, role: FieldRole, max_length: Option<u32>);
    /// Raise the host's change notification for a field, so dependent UI
    /// (e.g. a state dropdown) can react to a programmatic write.
    fn notify_changed(&self, role: FieldRole);
    /// Replace the group's message slot content and show it.
    fn show_message(&self, text: &str);
    fn hide_message(&self);
    /// Toggle the busy indicator for the group.
    fn set_busy(&self, busy: bool);
}

// ── In-memory reference implementation ──────────────────────────────

#[derive(Debug, Clone, Default)]
struct FieldState {
    value: String,
    read_only: bool,
    disabled: bool,
    hidden: bool,
    max_length: Option<u32>,
}

#[derive(Debug, Default)]
struct MemoryFormState {
    fields: HashMap<FieldRole, FieldState>,
    message: Option<String>,
    busy: bool,
    /// How many times the busy indicator was engaged (off -> on).
    busy_engagements: u32,
    /// Change notifications in the order they fired.
    change_notices: Vec<FieldRole>,
}

/// In-memory [`AddressForm`] used by tests and the CLI.
///
/// Clones share state, so a test can keep a handle while the controller
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    state: Arc<Mutex<MemoryFormState>>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryFormState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    // ── Inspection (tests / CLI) ─────────────────────────────────────

    pub fn is_read_only(&self, role: FieldRole) -> bool {
        self.lock().fields.entry(role).or_default().read_only
    }

    pub fn is_disabled(&self, role: FieldRole) -> bool {
        self.lock().fields.entry(role).or_default().disabled
    }

    pub fn is_visible(&self, role: FieldRole) -> bool {
        !self.lock().fields.entry(role).or_default().hidden
    }

    pub fn max_length(&self, role: FieldRole) -> Option<u32> {
        self.lock().fields.entry(role).or_default().max_length
    }

    pub fn message(&self) -> Option<String> {
        self.lock().message.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().busy
    }

    /// How many times the busy indicator went from off to on.
    pub fn busy_engagements(&self) -> u32 {
        self.lock().busy_engagements
    }

    /// Change notifications observed so far, in order.
    pub fn change_notices(&self) -> Vec<FieldRole> {
        self.lock().change_notices.clone()
    }
}

impl AddressForm for MemoryForm {
    fn value(&self, role: FieldRole) -> String {
        self.lock().fields.entry(role).or_default().value.clone()
    }

    fn set_value(&self, role: FieldRole, value: &str) {
        self.lock().fields.entry(role).or_default().value = value.to_owned();
    }

    fn set_read_only(&self, role: FieldRole, read_only: bool) {
        self.lock().fields.entry(role).or_default().read_only = read_only;
    }

    fn set_disabled(&self, role: FieldRole, disabled: bool) {
        self.lock().fields.entry(role).or_default().disabled = disabled;
    }

    fn set_visible(&self, role: FieldRole, visible: bool) {
        self.lock().fields.entry(role).or_default().hidden = !visible;
    }

    fn set_max_length(&self, role: FieldRole, max_length: Option<u32>) {
        self.lock().fields.entry(role).or_default().max_length = max_length;
    }

    fn notify_changed(&self, role: FieldRole) {
        self.lock().change_notices.push(role);
    }

    fn show_message(&self, text: &str) {
        self.lock().message = Some(text.to_owned());
    }

    fn hide_message(&self) {
        self.lock().message = None;
    }

    fn set_busy(&self, busy: bool) {
        let mut state = self.lock();
        if busy && !state.busy {
            state.busy_engagements += 1;
        }
        state.busy = busy;
    }
}
