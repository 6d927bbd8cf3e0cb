// ── Lookup controller ──
//
// One instance per address field group (billing, shipping). Owns the
// debounce timer, the response cache, and the in-flight request handle;
// instances share nothing. Event-driven: the host forwards country
// changes, keystroke edits, and blur events, and the controller mutates
// the form through the AddressForm seam.
//
// Concurrency model: all mutable state sits behind one async Mutex.
// The only suspension points are the debounce sleep and the network
// await, both outside the lock. At most one request is in flight; a
// newer lookup aborts the older task, and a generation counter discards
// any late completion that slipped past the abort.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::debug;

use postlook_api::{LookupClient, LookupRequest, TransportConfig};

use crate::cache::LookupCache;
use crate::classify::classify;
use crate::config::LookupConfig;
use crate::debounce::Debouncer;
use crate::eligibility::EligibilityGate;
use crate::error::CoreError;
use crate::form::{AddressForm, FieldGroupConfig, FieldRole};
use crate::lock::FieldLockPolicy;
use crate::model::{FailureReason, LookupResult, ResolvedAddress};
use crate::state::LookupState;
use crate::validate::{self, Validity};

/// Drives the lookup flow for one address field group.
///
/// Cheaply cloneable; clones share the same instance state.
///
/// Event policy (pinned by tests): keystroke edits go through the
/// trailing-edge debounce; a blur event bypasses the debounce, first
/// re-validating the blurred field (a non-empty invalid value shows that
/// field's configured message) and otherwise attempting the lookup
/// immediately.
#[derive(Clone)]
pub struct LookupController {
    shared: Arc<Shared>,
}

struct Shared {
    config: LookupConfig,
    form: Arc<dyn AddressForm>,
    client: LookupClient,
    gate: EligibilityGate,
    lock_policy: FieldLockPolicy,
    state_tx: watch::Sender<LookupState>,
    inner: Mutex<Inner>,
}

struct Inner {
    cache: LookupCache,
    debounce: Debouncer,
    /// Identifies the current in-flight lookup; responses carrying a
    /// stale generation are discarded.
    generation: u64,
    in_flight: Option<tokio::task::AbortHandle>,
}

impl LookupController {
    /// Create a controller for one field group. Does NOT evaluate the
    /// pre-selected country -- call [`start()`](Self::start) once the
    /// form is bound.
    pub fn new(config: LookupConfig, form: Arc<dyn AddressForm>) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            ..TransportConfig::default()
        };
        let client = LookupClient::new(config.endpoint.as_str(), &config.action, &transport)?;

        Ok(Self::with_client(config, client, form))
    }

    /// Create a controller around an existing client (tests inject a
    /// client pointed at a mock server).
    pub fn with_client(
        config: LookupConfig,
        client: LookupClient,
        form: Arc<dyn AddressForm>,
    ) -> Self {
        let gate = EligibilityGate::new(config.supported_countries.clone());
        let (state_tx, _) = watch::channel(LookupState::Disabled);
        let debounce = Debouncer::new(config.debounce);

        Self {
            shared: Arc::new(Shared {
                config,
                form,
                client,
                gate,
                lock_policy: FieldLockPolicy::default(),
                state_tx,
                inner: Mutex::new(Inner {
                    cache: LookupCache::new(),
                    debounce,
                    generation: 0,
                    in_flight: None,
                }),
            }),
        }
    }

    /// Access the controller configuration.
    pub fn config(&self) -> &LookupConfig {
        &self.shared.config
    }

    /// The field group this controller drives; host adapters resolve
    /// roles to concrete form elements through it.
    pub fn field_group(&self) -> &FieldGroupConfig {
        &self.shared.config.field_group
    }

    /// Subscribe to controller state transitions.
    pub fn state(&self) -> watch::Receiver<LookupState> {
        self.shared.state_tx.subscribe()
    }

    fn current_state(&self) -> LookupState {
        *self.shared.state_tx.borrow()
    }

    fn transition(&self, next: LookupState) {
        let prev = self.shared.state_tx.send_replace(next);
        if prev != next {
            debug!(?prev, ?next, "state transition");
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Establish the starting state from the pre-selected country.
    /// Equivalent to one synthetic country-change event.
    pub async fn start(&self) {
        self.country_changed().await;
    }

    /// Re-evaluate eligibility after the country field changed.
    ///
    /// Eligible: lock derived fields, show the number/suffix inputs,
    /// engage edit handling. Ineligible: cancel everything pending,
    /// hard-reset the inputs, release the lock, go `Disabled`.
    pub async fn country_changed(&self) {
        let shared = &self.shared;
        let form = shared.form.as_ref();
        let country = form.value(FieldRole::Country);
        let eligible = shared.gate.is_eligible(&country);
        debug!(
            group = %shared.config.field_group.prefix,
            country = %country.trim(),
            eligible,
            "country changed"
        );

        let mut inner = shared.inner.lock().await;

        if eligible {
            form.set_visible(FieldRole::StreetNumber, true);
            form.set_visible(FieldRole::StreetNumberSuffix, true);
            shared.lock_policy.apply(form);

            if !self.current_state().is_active() {
                self.transition(LookupState::Idle);
            }
        } else {
            inner.debounce.cancel();
            Self::abort_in_flight(&mut inner);

            Self::hard_reset(form);
            shared.lock_policy.release(form);
            form.set_visible(FieldRole::StreetNumber, false);
            form.set_visible(FieldRole::StreetNumberSuffix, false);

            self.transition(LookupState::Disabled);
        }
    }

    // ── Edit events ──────────────────────────────────────────────────

    /// A keystroke edit on one of the query input fields. Debounced:
    /// rapid edits collapse into one lookup attempt.
    pub async fn field_edited(&self, role: FieldRole) {
        if !role.is_input() || !self.current_state().is_active() {
            return;
        }

        self.transition(LookupState::AwaitingInput);

        let this = self.clone();
        let mut inner = self.shared.inner.lock().await;
        inner.debounce.call(async move {
            this.attempt_lookup().await;
        });
    }

    /// A blur event on one of the query input fields. Bypasses the
    /// debounce: validates the blurred field, then attempts the lookup
    /// immediately.
    pub async fn field_blurred(&self, role: FieldRole) {
        if !role.is_input() || !self.current_state().is_active() {
            return;
        }

        {
            let mut inner = self.shared.inner.lock().await;
            inner.debounce.cancel();
        }

        let form = self.shared.form.as_ref();
        let raw = form.value(role);
        let validity = match role {
            FieldRole::PostalCode => validate::postal_code(&raw),
            FieldRole::StreetNumber => validate::street_number(&raw),
            _ => validate::street_number_suffix(&raw),
        };

        if validity == Validity::Invalid {
            let messages = &self.shared.config.messages;
            let text = match role {
                FieldRole::PostalCode => &messages.invalid_postal_code,
                FieldRole::StreetNumber => &messages.invalid_street_number,
                _ => &messages.invalid_street_number_suffix,
            };

            Self::soft_reset(form);
            form.show_message(text);
            self.transition(LookupState::Failed);
            return;
        }

        self.attempt_lookup().await;
    }

    // ── Lookup ───────────────────────────────────────────────────────

    /// Validate the current input triple and, if complete, resolve it
    /// through the cache or the network.
    pub async fn attempt_lookup(&self) {
        let shared = &self.shared;
        let form = shared.form.as_ref();

        let raw = LookupRequest::new(
            form.value(FieldRole::PostalCode),
            form.value(FieldRole::StreetNumber),
            form.value(FieldRole::StreetNumberSuffix),
        );

        let complete = validate::postal_code(&raw.postal_code).is_valid()
            && validate::street_number(&raw.street_number).is_valid()
            && validate::street_number_suffix(&raw.street_number_suffix).is_valid();

        let mut inner = shared.inner.lock().await;

        // A country change may have raced the debounce timer.
        if !self.current_state().is_active() {
            return;
        }

        if !complete {
            Self::soft_reset(form);
            form.hide_message();
            self.transition(LookupState::AwaitingInput);
            return;
        }

        if let Some(result) = inner.cache.get(&raw).cloned() {
            debug!("cache hit, applying stored outcome");
            // The cached outcome is now the newest intent: anything still
            // in flight is stale and must not land after this fill.
            Self::abort_in_flight(&mut inner);
            inner.generation += 1;
            self.apply_result(&result);
            return;
        }

        // Supersede any previous in-flight request.
        Self::abort_in_flight(&mut inner);
        inner.generation += 1;
        let generation = inner.generation;

        // Enter Loading: busy indicator on, inputs disabled, message gone.
        form.set_busy(true);
        for role in FieldRole::INPUTS {
            form.set_disabled(role, true);
        }
        form.hide_message();
        self.transition(LookupState::Loading);

        let this = self.clone();
        let handle = tokio::spawn(async move {
            let outcome = this.shared.client.lookup(&raw).await;
            let result = classify(outcome);

            let mut inner = this.shared.inner.lock().await;
            if inner.generation != generation {
                debug!(generation, "discarding superseded lookup response");
                return;
            }

            inner.in_flight = None;
            inner.cache.insert(&raw, result.clone());
            this.apply_result(&result);
        });

        inner.in_flight = Some(handle.abort_handle());
    }

    // ── Result application ───────────────────────────────────────────

    fn apply_result(&self, result: &LookupResult) {
        let form = self.shared.form.as_ref();

        form.set_busy(false);
        for role in FieldRole::INPUTS {
            form.set_disabled(role, false);
        }

        match result {
            LookupResult::Success(address) => {
                self.fill_fields(address);
                form.hide_message();
                self.transition(LookupState::Filled);
            }
            LookupResult::Failure(reason) => {
                let messages = &self.shared.config.messages;
                let text = match reason {
                    FailureReason::ZeroResults => &messages.invalid_address,
                    FailureReason::InvalidRequest => {
                        &messages.invalid_postal_code_or_street_number
                    }
                    FailureReason::Unavailable | FailureReason::AccessRestricted => {
                        &messages.unknown_error
                    }
                };

                Self::soft_reset(form);
                form.show_message(text);

                // The service is unusable for this session: hand the
                // derived fields back for manual entry until the next
                // country-change re-evaluation.
                if reason.releases_lock() {
                    self.shared.lock_policy.release(form);
                }

                self.transition(LookupState::Failed);
            }
        }
    }

    fn fill_fields(&self, address: &ResolvedAddress) {
        let form = self.shared.form.as_ref();

        // Reflect service-normalized query values back into the inputs.
        if let Some(postal_code) = &address.postal_code {
            form.set_value(FieldRole::PostalCode, postal_code);
        }
        if let Some(number) = &address.street_number {
            form.set_value(FieldRole::StreetNumber, number);
        }
        if let Some(suffix) = &address.street_number_suffix {
            form.set_value(FieldRole::StreetNumberSuffix, suffix);
        }

        form.set_value(
            FieldRole::Street,
            address.street_name.as_deref().unwrap_or_default(),
        );
        form.set_value(FieldRole::City, address.city.as_deref().unwrap_or_default());

        if let Some(abbreviation) = &address.state_abbreviation {
            form.set_value(FieldRole::State, abbreviation);
            form.notify_changed(FieldRole::State);
        }
    }

    // ── Resets ───────────────────────────────────────────────────────

    /// Clear derived fields only; postcode/number input stays.
    fn soft_reset(form: &dyn AddressForm) {
        form.set_value(FieldRole::Street, "");
        form.set_value(FieldRole::City, "");
        form.set_value(FieldRole::State, "");
        form.notify_changed(FieldRole::State);

        form.set_busy(false);
        for role in FieldRole::INPUTS {
            form.set_disabled(role, false);
        }
    }

    /// Clear the query inputs as well; used when lookup becomes
    /// inapplicable.
    fn hard_reset(form: &dyn AddressForm) {
        for role in FieldRole::INPUTS {
            form.set_value(role, "");
        }
        form.hide_message();

        Self::soft_reset(form);
    }

    fn abort_in_flight(inner: &mut Inner) {
        if let Some(handle) = inner.in_flight.take() {
            handle.abort();
        }
    }
}
