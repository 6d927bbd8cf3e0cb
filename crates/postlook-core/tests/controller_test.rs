#![allow(clippy::unwrap_used)]
// End-to-end controller tests: MemoryForm + wiremock relay.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use postlook_core::{
    AddressForm, FieldGroupConfig, FieldRole, LookupConfig, LookupController, LookupState,
    MemoryForm,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn config_for(server: &MockServer) -> LookupConfig {
    let mut config = LookupConfig::new(Url::parse(&server.uri()).unwrap());
    config.debounce = Duration::from_millis(100);
    config
}

async fn controller_with(
    server: &MockServer,
    country: &str,
) -> (LookupController, MemoryForm) {
    let form = MemoryForm::new();
    form.set_value(FieldRole::Country, country);

    let controller =
        LookupController::new(config_for(server), Arc::new(form.clone())).unwrap();
    controller.start().await;

    (controller, form)
}

fn type_address(form: &MemoryForm, postcode: &str, number: &str, suffix: &str) {
    form.set_value(FieldRole::PostalCode, postcode);
    form.set_value(FieldRole::StreetNumber, number);
    form.set_value(FieldRole::StreetNumberSuffix, suffix);
}

async fn wait_settled(controller: &LookupController) -> LookupState {
    let mut rx = controller.state();
    let settled = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| s.is_settled()))
        .await
        .expect("lookup should settle within 5s")
        .unwrap();
    *settled
}

fn kanaalweg_envelope() -> serde_json::Value {
    json!({
        "status": "ok",
        "results": [{
            "postal_code": "2611KL",
            "street_number": "23",
            "street_number_suffix": "",
            "street_name": "Kanaalweg",
            "city": "Delft",
            "administrative_areas": [{"abbreviation": "ZH"}]
        }]
    })
}

// ── Construction ────────────────────────────────────────────────────

#[tokio::test]
async fn controller_carries_its_field_group() {
    let server = MockServer::start().await;

    let mut config = config_for(&server);
    config.field_group = FieldGroupConfig::shipping();
    let controller =
        LookupController::new(config, Arc::new(MemoryForm::new())).unwrap();

    let group = controller.field_group();
    assert_eq!(group.prefix, "shipping");
    assert_eq!(
        group.selector(FieldRole::PostalCode).unwrap().0,
        "#shipping_postcode"
    );
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn valid_input_fills_derived_fields_and_keeps_lock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kanaalweg_envelope()))
        .mount(&server)
        .await;

    let (controller, form) = controller_with(&server, "NL").await;

    // Eligibility engaged on start: derived fields locked, inputs shown.
    assert!(form.is_read_only(FieldRole::Street));
    assert!(form.is_visible(FieldRole::StreetNumber));
    assert_eq!(form.max_length(FieldRole::PostalCode), Some(7));

    type_address(&form, "2611KL", "23", "");
    controller.field_blurred(FieldRole::PostalCode).await;
    let state = wait_settled(&controller).await;

    assert_eq!(state, LookupState::Filled);
    assert_eq!(form.value(FieldRole::Street), "Kanaalweg");
    assert_eq!(form.value(FieldRole::City), "Delft");
    assert_eq!(form.value(FieldRole::State), "ZH");
    assert!(form.change_notices().contains(&FieldRole::State));
    assert_eq!(form.message(), None);
    assert!(!form.is_busy());
    // Lock stays engaged after a successful fill.
    assert!(form.is_read_only(FieldRole::Street));
}

// ── Failure classification ──────────────────────────────────────────

#[tokio::test]
async fn zero_results_shows_message_and_keeps_lock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "failed", "status_code": "ZERO_RESULTS" })),
        )
        .mount(&server)
        .await;

    let (controller, form) = controller_with(&server, "NL").await;
    type_address(&form, "2611KL", "23", "");
    controller.field_blurred(FieldRole::PostalCode).await;
    let state = wait_settled(&controller).await;

    assert_eq!(state, LookupState::Failed);
    assert_eq!(form.value(FieldRole::Street), "");
    assert_eq!(form.value(FieldRole::City), "");
    assert_eq!(form.value(FieldRole::State), "");
    assert_eq!(
        form.message().as_deref(),
        Some("No address found for this postcode and street number.")
    );
    // Still eligible; the user may retry with different numbers.
    assert!(form.is_read_only(FieldRole::Street));
}

#[tokio::test]
async fn timeout_shows_unknown_error_and_releases_lock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(kanaalweg_envelope())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.timeout = Duration::from_millis(300);

    let form = MemoryForm::new();
    form.set_value(FieldRole::Country, "NL");
    let controller = LookupController::new(config, Arc::new(form.clone())).unwrap();
    controller.start().await;

    type_address(&form, "2611KL", "23", "");
    controller.field_blurred(FieldRole::PostalCode).await;
    let state = wait_settled(&controller).await;

    assert_eq!(state, LookupState::Failed);
    assert_eq!(
        form.message().as_deref(),
        Some("An unknown error occurred, please fill in the address manually.")
    );
    // Service unusable: automation abandoned, fields handed back.
    assert!(!form.is_read_only(FieldRole::Street));
    assert!(form.is_visible(FieldRole::State));
}

// ── Cache ───────────────────────────────────────────────────────────

#[tokio::test]
async fn identical_lookups_hit_the_network_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kanaalweg_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let (controller, form) = controller_with(&server, "NL").await;
    type_address(&form, "2611KL", "23", "");

    controller.field_blurred(FieldRole::PostalCode).await;
    wait_settled(&controller).await;
    assert_eq!(form.busy_engagements(), 1);

    // Clear a derived field so we can see the cached fill re-apply.
    form.set_value(FieldRole::Street, "");

    // Different spelling, same normalized request: served from cache,
    // synchronously, with no busy-indicator flicker.
    form.set_value(FieldRole::PostalCode, "2611 kl");
    controller.field_blurred(FieldRole::PostalCode).await;

    assert_eq!(*controller.state().borrow(), LookupState::Filled);
    assert_eq!(form.value(FieldRole::Street), "Kanaalweg");
    assert_eq!(form.busy_engagements(), 1);

    server.verify().await;
}

// ── Cancellation ────────────────────────────────────────────────────

#[tokio::test]
async fn superseded_lookup_response_is_discarded() {
    let server = MockServer::start().await;

    let slow = json!({
        "status": "ok",
        "results": [{ "street_name": "Tragestraat", "city": "Delft",
                      "administrative_areas": [{"abbreviation": "ZH"}] }]
    });
    Mock::given(method("GET"))
        .and(query_param("postal_code", "1111AA"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(slow)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let fast = json!({
        "status": "ok",
        "results": [{ "street_name": "Snelstraat", "city": "Delft",
                      "administrative_areas": [{"abbreviation": "ZH"}] }]
    });
    Mock::given(method("GET"))
        .and(query_param("postal_code", "2222BB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fast))
        .mount(&server)
        .await;

    let (controller, form) = controller_with(&server, "NL").await;

    type_address(&form, "1111AA", "1", "");
    controller.field_blurred(FieldRole::PostalCode).await;

    // Supersede before the slow response lands.
    type_address(&form, "2222BB", "2", "");
    controller.field_blurred(FieldRole::PostalCode).await;

    let state = wait_settled(&controller).await;
    assert_eq!(state, LookupState::Filled);
    assert_eq!(form.value(FieldRole::Street), "Snelstraat");

    // Give the abandoned response every chance to (wrongly) land.
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(form.value(FieldRole::Street), "Snelstraat");
    assert_eq!(*controller.state().borrow(), LookupState::Filled);
}

#[tokio::test]
async fn cache_hit_supersedes_the_in_flight_request() {
    let server = MockServer::start().await;

    let slow = json!({
        "status": "ok",
        "results": [{ "street_name": "Tragestraat", "city": "Delft",
                      "administrative_areas": [{"abbreviation": "ZH"}] }]
    });
    Mock::given(method("GET"))
        .and(query_param("postal_code", "1111AA"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(slow)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let fast = json!({
        "status": "ok",
        "results": [{ "street_name": "Snelstraat", "city": "Delft",
                      "administrative_areas": [{"abbreviation": "ZH"}] }]
    });
    Mock::given(method("GET"))
        .and(query_param("postal_code", "2222BB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fast))
        .mount(&server)
        .await;

    let (controller, form) = controller_with(&server, "NL").await;

    // Warm the cache with the fast address.
    type_address(&form, "2222BB", "2", "");
    controller.field_blurred(FieldRole::PostalCode).await;
    wait_settled(&controller).await;
    assert_eq!(form.value(FieldRole::Street), "Snelstraat");

    // Put the slow lookup in flight, then return to the cached one
    // before it lands.
    type_address(&form, "1111AA", "1", "");
    controller.field_blurred(FieldRole::PostalCode).await;
    type_address(&form, "2222BB", "2", "");
    controller.field_blurred(FieldRole::PostalCode).await;

    assert_eq!(form.value(FieldRole::Street), "Snelstraat");
    assert_eq!(*controller.state().borrow(), LookupState::Filled);

    // The abandoned slow response must not overwrite the cached fill.
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(form.value(FieldRole::Street), "Snelstraat");
    assert_eq!(*controller.state().borrow(), LookupState::Filled);
}

// ── Debounce policy ─────────────────────────────────────────────────

#[tokio::test]
async fn rapid_edits_collapse_into_one_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kanaalweg_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let (controller, form) = controller_with(&server, "NL").await;

    type_address(&form, "2611K", "23", "");
    controller.field_edited(FieldRole::PostalCode).await;
    form.set_value(FieldRole::PostalCode, "2611KL");
    controller.field_edited(FieldRole::PostalCode).await;
    controller.field_edited(FieldRole::StreetNumber).await;

    assert_eq!(*controller.state().borrow(), LookupState::AwaitingInput);

    let state = wait_settled(&controller).await;
    assert_eq!(state, LookupState::Filled);

    server.verify().await;
}

#[tokio::test]
async fn blur_bypasses_the_debounce_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kanaalweg_envelope()))
        .mount(&server)
        .await;

    // A debounce window far longer than the settle timeout: only the
    // blur fast-path can finish this lookup in time.
    let mut config = config_for(&server);
    config.debounce = Duration::from_secs(30);

    let form = MemoryForm::new();
    form.set_value(FieldRole::Country, "NL");
    let controller = LookupController::new(config, Arc::new(form.clone())).unwrap();
    controller.start().await;

    type_address(&form, "2611KL", "23", "");
    controller.field_blurred(FieldRole::PostalCode).await;
    let state = wait_settled(&controller).await;

    assert_eq!(state, LookupState::Filled);
}

#[tokio::test]
async fn blur_on_invalid_field_shows_its_message_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kanaalweg_envelope()))
        .expect(0)
        .mount(&server)
        .await;

    let (controller, form) = controller_with(&server, "NL").await;

    // Reserved letter pair: structurally plausible but never issued.
    form.set_value(FieldRole::PostalCode, "1000SA");
    controller.field_blurred(FieldRole::PostalCode).await;

    assert_eq!(*controller.state().borrow(), LookupState::Failed);
    assert_eq!(form.message().as_deref(), Some("Invalid postcode format."));

    server.verify().await;
}

#[tokio::test]
async fn incomplete_input_withholds_lookup_silently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kanaalweg_envelope()))
        .expect(0)
        .mount(&server)
        .await;

    let (controller, form) = controller_with(&server, "NL").await;

    // Postcode present, street number still empty: not yet valid.
    form.set_value(FieldRole::PostalCode, "2611KL");
    controller.field_blurred(FieldRole::PostalCode).await;

    assert_eq!(*controller.state().borrow(), LookupState::AwaitingInput);
    assert_eq!(form.message(), None);
    assert!(!form.is_busy());

    server.verify().await;
}

// ── Eligibility lifecycle ───────────────────────────────────────────

#[tokio::test]
async fn ineligible_country_disables_lookup_entirely() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kanaalweg_envelope()))
        .expect(0)
        .mount(&server)
        .await;

    let (controller, form) = controller_with(&server, "DE").await;

    assert_eq!(*controller.state().borrow(), LookupState::Disabled);
    assert!(!form.is_read_only(FieldRole::Street));
    assert!(!form.is_visible(FieldRole::StreetNumber));

    type_address(&form, "2611KL", "23", "");
    controller.field_blurred(FieldRole::PostalCode).await;
    controller.field_edited(FieldRole::PostalCode).await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(*controller.state().borrow(), LookupState::Disabled);
    server.verify().await;
}

#[tokio::test]
async fn switching_to_ineligible_country_hard_resets_and_unlocks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kanaalweg_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let (controller, form) = controller_with(&server, "NL").await;
    type_address(&form, "2611KL", "23", "");
    controller.field_blurred(FieldRole::PostalCode).await;
    wait_settled(&controller).await;
    assert_eq!(form.value(FieldRole::Street), "Kanaalweg");

    form.set_value(FieldRole::Country, "DE");
    controller.country_changed().await;

    assert_eq!(*controller.state().borrow(), LookupState::Disabled);
    assert_eq!(form.value(FieldRole::PostalCode), "");
    assert_eq!(form.value(FieldRole::StreetNumber), "");
    assert_eq!(form.value(FieldRole::Street), "");
    assert_eq!(form.message(), None);
    assert!(!form.is_read_only(FieldRole::Street));
    assert!(form.is_visible(FieldRole::State));
    assert!(!form.is_visible(FieldRole::StreetNumber));

    // Editing after the switch must not fire another lookup.
    type_address(&form, "2611KL", "23", "");
    controller.field_edited(FieldRole::PostalCode).await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    server.verify().await;
}

#[tokio::test]
async fn country_change_reengages_lookup_after_service_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (controller, form) = controller_with(&server, "NL").await;
    type_address(&form, "2611KL", "23", "");
    controller.field_blurred(FieldRole::PostalCode).await;
    wait_settled(&controller).await;

    // Unavailable path released the lock for manual entry.
    assert!(!form.is_read_only(FieldRole::Street));

    // Re-selecting an eligible country re-engages the lock.
    controller.country_changed().await;
    assert!(form.is_read_only(FieldRole::Street));
    assert_eq!(form.max_length(FieldRole::PostalCode), Some(7));
}
