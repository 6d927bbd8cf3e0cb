// ── Envelope classification ──
//
// The single translation point from the wire layer to the domain model.
// Transport-level errors and unusable envelopes all collapse into
// `Unavailable`; everything else follows the envelope's own verdict.

use tracing::debug;

use postlook_api::{Error as ApiError, LookupEnvelope, LookupStatus};

use crate::model::{FailureReason, LookupResult};

/// Interpret the outcome of one relay round-trip.
///
/// - transport failure, timeout, non-envelope response -> `Unavailable`
/// - `status: "ok"` with at least one row -> `Success` (first row only)
/// - `status: "ok"` with zero rows -> `ZeroResults`
/// - `status: "failed"` -> mapped from `status_code`
pub fn classify(outcome: Result<LookupEnvelope, ApiError>) -> LookupResult {
    let envelope = match outcome {
        Ok(envelope) => envelope,
        Err(err) => {
            debug!(error = %err, "lookup transport failure");
            return LookupResult::Failure(FailureReason::Unavailable);
        }
    };

    match envelope.status {
        LookupStatus::Ok => match envelope.first_result() {
            Some(row) => LookupResult::Success(row.into()),
            None => LookupResult::Failure(FailureReason::ZeroResults),
        },
        LookupStatus::Failed => {
            let reason = envelope
                .status_code
                .as_deref()
                .map_or(FailureReason::Unavailable, FailureReason::from_status_code);
            LookupResult::Failure(reason)
        }
    }
}
