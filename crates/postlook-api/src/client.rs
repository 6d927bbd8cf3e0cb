// Hand-crafted async HTTP client for the address-lookup relay endpoint.
//
// The relay is a thin server-side forwarder: it accepts the query triple
// plus an `action` discriminator, attaches the upstream credential, and
// echoes the upstream JSON envelope back. HTTP 400/404 bodies are passed
// through verbatim (they still carry a parseable failed envelope);
// anything else outside the 2xx range is a hard transport-level failure.

use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{LookupEnvelope, LookupRequest};

/// Async client for the lookup relay endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct LookupClient {
    http: reqwest::Client,
    endpoint: Url,
    action: String,
    timeout_secs: u64,
}

impl LookupClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from the relay endpoint URL, action discriminator, and
    /// transport config.
    pub fn new(endpoint: &str, action: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let endpoint = Url::parse(endpoint)?;
        let http = transport.build_client()?;

        Ok(Self {
            http,
            endpoint,
            action: action.to_owned(),
            timeout_secs: transport.timeout.as_secs(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages timeouts).
    pub fn with_client(http: reqwest::Client, endpoint: Url, action: &str) -> Self {
        Self {
            http,
            endpoint,
            action: action.to_owned(),
            timeout_secs: TransportConfig::default().timeout.as_secs(),
        }
    }

    /// The configured relay endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // ── Lookup ───────────────────────────────────────────────────────

    /// Issue a single lookup and parse the response envelope.
    ///
    /// Query parameters are percent-encoded by `reqwest`. The raw (not
    /// normalized) field values are sent; the upstream service performs
    /// its own normalization and reflects canonical values back in the
    /// result rows.
    pub async fn lookup(&self, request: &LookupRequest) -> Result<LookupEnvelope, Error> {
        let url = self.endpoint.clone();
        debug!(%url, postal_code = %request.postal_code, "GET lookup");

        let resp = self
            .http
            .get(url)
            .query(&[
                ("action", self.action.as_str()),
                ("postal_code", request.postal_code.as_str()),
                ("street_number", request.street_number.as_str()),
                ("street_number_suffix", request.street_number_suffix.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.handle_response(resp).await
    }

    fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response(&self, resp: reqwest::Response) -> Result<LookupEnvelope, Error> {
        let status = resp.status();

        // 400/404 carry a failed envelope forwarded from upstream.
        let carries_envelope = status.is_success()
            || status == reqwest::StatusCode::BAD_REQUEST
            || status == reqwest::StatusCode::NOT_FOUND;

        if !carries_envelope {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| self.map_send_error(e))?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}
