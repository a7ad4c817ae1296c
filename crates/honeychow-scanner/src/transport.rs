//! Network transport for probes.
//!
//! The orchestrator only depends on the [`Transport`] trait; [`HttpTransport`]
//! is the `reqwest` implementation used by the binary. Exactly one attempt is
//! made per call.

use crate::error::{Result, ScanError, TransportError};
use crate::request::{Headers, ProbeRequest};
use async_trait::async_trait;
use honeychow_sites::HttpMethod;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{redirect, Client};
use std::error::Error as _;
use std::time::Duration;
use tracing::warn;

/// Maximum redirects followed per probe.
const MAX_REDIRECTS: usize = 10;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Decoded response body
    pub body: String,
}

/// Issues a single probe request.
///
/// Implementations must be thread-safe; one transport is shared by every
/// probe of a search.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request`, giving up after `timeout`.
    ///
    /// # Errors
    /// Returns [`TransportError::Timeout`] when the deadline passes and
    /// [`TransportError::Request`] for any other failure.
    async fn execute(
        &self,
        request: &ProbeRequest,
        timeout: Duration,
    ) -> std::result::Result<ProbeResponse, TransportError>;
}

/// `reqwest`-backed transport sharing one connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a fresh client that follows redirects.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| ScanError::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }

    /// The underlying client, e.g. for fetching the site database.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: &ProbeRequest,
        timeout: Duration,
    ) -> std::result::Result<ProbeResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        }
        .headers(to_header_map(&request.headers))
        .timeout(timeout);

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| to_transport_error(&e, timeout))?;

        let status_code = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| to_transport_error(&e, timeout))?;

        Ok(ProbeResponse { status_code, body })
    }
}

/// Convert headers, skipping (and logging) names or values HTTP rejects.
fn to_header_map(headers: &Headers) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                map.insert(name, value);
            }
            _ => warn!(header = %name, "skipping invalid header"),
        }
    }

    map
}

fn to_transport_error(error: &reqwest::Error, timeout: Duration) -> TransportError {
    if error.is_timeout() {
        return TransportError::Timeout { after: timeout };
    }

    // The innermost cause ("Connection refused", "dns error") says more
    // than reqwest's "error sending request for url (...)" wrapper.
    let mut cause: &dyn std::error::Error = error;
    while let Some(source) = cause.source() {
        cause = source;
    }

    TransportError::Request(cause.to_string())
}
