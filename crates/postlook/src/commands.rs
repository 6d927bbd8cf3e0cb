//! Command handlers.
//!
//! `lookup` drives a real controller against a `MemoryForm` standing in for
//! the checkout page; `validate` runs the offline format checks only.

use std::sync::Arc;
use std::time::Duration;

use owo_colors::OwoColorize;
use tokio::time::timeout;
use tracing::debug;

use postlook_core::validate::{self, Validity};
use postlook_core::{
    AddressForm, FieldRole, LookupController, LookupState, MemoryForm, ResolvedAddress,
};

use crate::cli::{GlobalOpts, LookupArgs, ValidateArgs};
use crate::config;
use crate::error::CliError;

// ── lookup ───────────────────────────────────────────────────────────

pub async fn lookup(args: &LookupArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let file_config = config::load()?;
    let lookup_config = config::resolve(&file_config, global)?;

    // Reject malformed input up front rather than round-tripping a request
    // the controller would withhold anyway.
    check_input(&args.postcode, &args.street_number, &args.suffix)?;

    let form = MemoryForm::new();
    form.set_value(FieldRole::Country, &global.country);
    form.set_value(FieldRole::PostalCode, &args.postcode);
    form.set_value(FieldRole::StreetNumber, &args.street_number);
    form.set_value(FieldRole::StreetNumberSuffix, &args.suffix);

    debug!(endpoint = %lookup_config.endpoint, country = %global.country, "starting lookup");

    let wait_budget = lookup_config.timeout + Duration::from_secs(2);
    let controller = LookupController::new(lookup_config, Arc::new(form.clone()))
        .map_err(|e| CliError::Config {
            message: e.to_string(),
        })?;

    let mut state = controller.state();
    controller.start().await;
    if !state.borrow().is_active() {
        return Err(CliError::IneligibleCountry {
            country: global.country.clone(),
        });
    }

    // Blur skips the debounce window, so the lookup fires immediately.
    controller.field_blurred(FieldRole::PostalCode).await;

    let settled = timeout(wait_budget, state.wait_for(|s| s.is_settled())).await;
    let outcome = match settled {
        Ok(Ok(state_ref)) => *state_ref,
        Ok(Err(_)) | Err(_) => {
            return Err(CliError::LookupFailed {
                message: "lookup did not complete in time".into(),
                unavailable: true,
            });
        }
    };

    match outcome {
        LookupState::Filled => {
            println!("{}", format_address(&resolved_from(&form)));
            Ok(())
        }
        _ => {
            let message = form
                .message()
                .unwrap_or_else(|| "lookup failed".into());
            // Service-class failures release the field lock; address-class
            // failures keep it. That distinction drives the exit code.
            let unavailable = !form.is_read_only(FieldRole::Street);
            Err(CliError::LookupFailed {
                message,
                unavailable,
            })
        }
    }
}

fn check_input(postcode: &str, street_number: &str, suffix: &str) -> Result<(), CliError> {
    if !validate::postal_code(postcode).is_valid() {
        return Err(CliError::InvalidInput {
            message: format!("postcode {postcode:?} is not a valid Dutch postcode"),
        });
    }
    if !validate::street_number(street_number).is_valid() {
        return Err(CliError::InvalidInput {
            message: format!("street number {street_number:?} must be 1-5 digits"),
        });
    }
    if validate::street_number_suffix(suffix) == Validity::Invalid {
        return Err(CliError::InvalidInput {
            message: format!("suffix {suffix:?} is not a valid street number suffix"),
        });
    }
    Ok(())
}

fn resolved_from(form: &MemoryForm) -> ResolvedAddress {
    let field = |role: FieldRole| {
        let value = form.value(role);
        (!value.is_empty()).then_some(value)
    };

    ResolvedAddress {
        street_name: field(FieldRole::Street),
        city: field(FieldRole::City),
        state_abbreviation: field(FieldRole::State),
        postal_code: field(FieldRole::PostalCode),
        street_number: field(FieldRole::StreetNumber),
        street_number_suffix: field(FieldRole::StreetNumberSuffix),
    }
}

fn format_address(address: &ResolvedAddress) -> String {
    let street = address.street_name.as_deref().unwrap_or_default();
    let postcode = address.postal_code.as_deref().unwrap_or_default();
    let city = address.city.as_deref().unwrap_or_default();

    let mut out = format!(
        "{} {}\n{postcode} {city}",
        street.bold(),
        address.display_number().bold()
    );
    if let Some(state) = &address.state_abbreviation {
        out.push_str(&format!("\n{}", state.dimmed()));
    }
    out
}

// ── validate ─────────────────────────────────────────────────────────

pub fn validate_fields(args: &ValidateArgs) -> Result<(), CliError> {
    let checks = [
        ("postcode", validate::postal_code(&args.postcode)),
        ("street number", validate::street_number(&args.street_number)),
        ("suffix", validate::street_number_suffix(&args.suffix)),
    ];

    let mut invalid = Vec::new();
    for (label, validity) in checks {
        println!("{label:>14}: {}", describe(validity));
        if validity == Validity::Invalid {
            invalid.push(label);
        }
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(CliError::InvalidInput {
            message: format!("invalid fields: {}", invalid.join(", ")),
        })
    }
}

fn describe(validity: Validity) -> String {
    match validity {
        Validity::Valid => "valid".green().to_string(),
        Validity::Incomplete => "incomplete".yellow().to_string(),
        Validity::Invalid => "invalid".red().to_string(),
    }
}
