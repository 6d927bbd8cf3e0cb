//! Address-lookup controller layer between `postlook-api` and host front ends.
//!
//! This crate owns the checkout-side lookup flow for Dutch postal
//! addresses: a debounced, cached, cancellable lookup state machine
//! coupled to form-field locking and validation feedback. One
//! [`LookupController`] instance drives one address field group (billing
//! or shipping); instances are fully independent.
//!
//! - **[`LookupController`]** — Central facade. Feed it
//!   [`country_changed()`](LookupController::country_changed),
//!   [`field_edited()`](LookupController::field_edited), and
//!   [`field_blurred()`](LookupController::field_blurred) events from the
//!   host form; it validates input, debounces keystrokes, consults the
//!   response cache, issues at most one in-flight request, and writes the
//!   resolved street/city/state back through the [`AddressForm`] trait.
//!
//! - **[`AddressForm`]** — Seam to the host form. A field holds a string
//!   value and can be disabled, marked read-only, hidden, or
//!   length-constrained, and can raise a change notification; nothing
//!   more is assumed. [`MemoryForm`] is the in-crate reference
//!   implementation used by tests and the CLI.
//!
//! - **[`LookupState`]** — Explicit enum-valued controller state,
//!   published on a `tokio::sync::watch` channel so consumers can await
//!   quiescence instead of polling field values.
//!
//! - **Pure pieces** — [`validate`] (Dutch format checks),
//!   [`EligibilityGate`] (country allow-list), [`LookupCache`]
//!   (per-instance memoization, failures included), and [`classify`]
//!   (wire envelope to domain [`LookupResult`]).

pub mod cache;
pub mod classify;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod eligibility;
pub mod error;
pub mod form;
pub mod lock;
pub mod model;
pub mod state;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::LookupCache;
pub use classify::classify;
pub use config::{LookupConfig, Messages};
pub use controller::LookupController;
pub use debounce::Debouncer;
pub use eligibility::EligibilityGate;
pub use error::CoreError;
pub use form::{AddressForm, FieldGroupConfig, FieldRole, FieldSelector, MemoryForm};
pub use lock::FieldLockPolicy;
pub use model::{FailureReason, LookupResult, ResolvedAddress};
pub use state::LookupState;
