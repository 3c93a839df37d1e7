//! Request execution and outcome classification.
//!
//! The [`Transport`] trait is the seam between the pipeline and the network:
//! the production implementation wraps a blocking reqwest client, test
//! doubles script statuses and failures and count calls. [`TransportClient`]
//! sits above it and owns the policy gate, header assembly, bounded
//! buffering, and the encoded-vs-fatal error split.

use std::io::Read;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::EgressConfig;
use crate::context::RequestContext;
use crate::http::{policy, HeaderSet, HttpError, ResponseBuffer};
use crate::observability::metrics;

/// Prefix of the payload returned in place of a body when the caller asked
/// for errors in the return channel.
pub const FETCH_FAILURE_PREFIX: &str = "error=fetch_url&error_description=";

/// Escape set for the error description: everything but ASCII alphanumerics
/// and `-._~` is percent-encoded, matching curl's URL escaping.
const ESCAPED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A fully assembled request, ready for a [`Transport`] to execute.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: String,
    pub url: String,
    /// Emission order: user-agent, custom headers newest-first, content type.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Executes one prepared request, streaming the body into `buffer`.
///
/// Implementations report connection-level problems as
/// [`HttpError::Transport`] and let buffer overruns surface as
/// [`HttpError::CapacityExceeded`]; the caller classifies everything else
/// from the returned status code.
pub trait Transport {
    fn execute(
        &mut self,
        request: &PreparedRequest,
        buffer: &mut ResponseBuffer,
    ) -> Result<u16, HttpError>;
}

/// [`Transport`] backed by `reqwest::blocking`, one client per context.
///
/// The underlying client keeps its connections alive between calls, giving
/// each context a reusable connection without any cross-context sharing.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a client with the configured timeouts.
    ///
    /// Timeouts are an addition over the historical behavior, which blocked
    /// without bound; both default to finite values.
    pub fn new(config: &EgressConfig) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn execute(
        &mut self,
        request: &PreparedRequest,
        buffer: &mut ResponseBuffer,
    ) -> Result<u16, HttpError> {
        let method: reqwest::Method = request
            .method
            .parse()
            .map_err(|_| HttpError::Transport(format!("invalid method {}", request.method)))?;
        let url = url::Url::parse(&request.url)
            .map_err(|e| HttpError::Transport(format!("invalid URL {}: {}", request.url, e)))?;

        let mut builder = self.client.request(method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let mut response = builder
            .send()
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        let status = response.status().as_u16();

        let mut chunk = [0u8; 8192];
        loop {
            let n = response
                .read(&mut chunk)
                .map_err(|e| HttpError::Transport(e.to_string()))?;
            if n == 0 {
                break;
            }
            buffer.append(&chunk[..n])?;
        }

        Ok(status)
    }
}

/// Classified result of one dispatch, as seen by the public entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Accepted status (200, 201, 204); the body exactly as received.
    Body(String),
    /// Failure encoded into the return channel (`error=fetch_url&...`).
    Encoded(String),
    /// 404 under the missing-as-not-found carve-out.
    Missing,
}

impl FetchOutcome {
    /// Collapse into the string the caller receives; `None` only for
    /// [`FetchOutcome::Missing`].
    pub fn into_body(self) -> Option<String> {
        match self {
            FetchOutcome::Body(body) | FetchOutcome::Encoded(body) => Some(body),
            FetchOutcome::Missing => None,
        }
    }
}

/// Parameters for one fetch.
#[derive(Debug, Clone, Copy)]
pub struct FetchRequest<'a> {
    pub method: &'a str,
    pub url: &'a str,
    pub headers: &'a HeaderSet,
    pub content_type: Option<&'a str>,
    pub body: Option<&'a str>,
    /// Report transport and status failures as an encoded payload instead of
    /// an error. Capacity overruns stay fatal regardless.
    pub encode_errors: bool,
    /// Classify a 404 as [`FetchOutcome::Missing`] instead of a failure.
    pub missing_as_not_found: bool,
}

/// Drives one request through policy, transport, and classification.
pub struct TransportClient<'a> {
    config: &'a EgressConfig,
}

impl<'a> TransportClient<'a> {
    pub fn new(config: &'a EgressConfig) -> Self {
        Self { config }
    }

    pub fn perform(
        &self,
        ctx: &mut RequestContext,
        request: &FetchRequest<'_>,
    ) -> Result<FetchOutcome, HttpError> {
        policy::check_url(request.url)?;

        let headers = self.assemble_headers(request)?;
        let prepared = PreparedRequest {
            method: request.method.to_string(),
            url: request.url.to_string(),
            headers,
            body: request.body.map(str::to_string),
        };

        let mut buffer = ResponseBuffer::with_limit(self.config.max_response_bytes);
        let transport = ctx.transport(self.config)?;

        let status = match transport.execute(&prepared, &mut buffer) {
            Ok(status) => status,
            Err(HttpError::Transport(message)) if request.encode_errors => {
                tracing::debug!(
                    method = request.method,
                    url = request.url,
                    error = %message,
                    "transport failure encoded into response"
                );
                metrics::record_fetch(request.method, "transport_error");
                return Ok(FetchOutcome::Encoded(encode_failure(&message, &mut buffer)?));
            }
            Err(err) => {
                tracing::warn!(
                    method = request.method,
                    url = request.url,
                    error = %err,
                    "outbound request failed"
                );
                metrics::record_fetch(request.method, "transport_error");
                return Err(err);
            }
        };

        ctx.record_status(status);

        match status {
            200 | 201 | 204 => {
                tracing::debug!(
                    method = request.method,
                    url = request.url,
                    status,
                    bytes = buffer.len(),
                    "outbound request completed"
                );
                metrics::record_fetch(request.method, "success");
                Ok(FetchOutcome::Body(buffer.into_string()))
            }
            404 if request.missing_as_not_found => {
                metrics::record_fetch(request.method, "not_found");
                Ok(FetchOutcome::Missing)
            }
            _ if request.encode_errors => {
                metrics::record_fetch(request.method, "http_error");
                let body = buffer.take_string();
                Ok(FetchOutcome::Encoded(encode_failure(&body, &mut buffer)?))
            }
            _ => {
                metrics::record_fetch(request.method, "http_error");
                Err(HttpError::Status {
                    status,
                    body: buffer.into_string(),
                })
            }
        }
    }

    /// User-agent first, custom headers newest-first, content type last.
    fn assemble_headers(
        &self,
        request: &FetchRequest<'_>,
    ) -> Result<Vec<(String, String)>, HttpError> {
        let mut headers = Vec::with_capacity(request.headers.len() + 2);
        headers.push(("User-Agent".to_string(), self.config.user_agent.clone()));
        for (name, value) in request.headers.iter() {
            headers.push((name.to_string(), value.to_string()));
        }
        if let Some(content_type) = request.content_type {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }
        // The injected user-agent makes an empty list impossible; an empty
        // list here means the assembly above was broken.
        if headers.is_empty() {
            return Err(HttpError::EmptyHeaderList);
        }
        Ok(headers)
    }
}

/// Rewrite `buffer` with the fixed-format encoded failure payload.
fn encode_failure(message: &str, buffer: &mut ResponseBuffer) -> Result<String, HttpError> {
    buffer.reset();
    buffer.append(FETCH_FAILURE_PREFIX.as_bytes())?;
    let description = utf8_percent_encode(message, ESCAPED).to_string();
    buffer.append(description.as_bytes())?;
    Ok(buffer.take_string())
}
