//! Public entry points composing cache, policy, transport, and buffering.

use crate::config::EgressConfig;
use crate::context::RequestContext;
use crate::http::transport::{FetchOutcome, FetchRequest, TransportClient};
use crate::http::{HeaderSet, HttpError};
use crate::observability::metrics;

/// Outbound dispatcher bound to one configuration.
///
/// All methods take the caller's [`RequestContext`] by `&mut`; per-context
/// state (connection, last status, retry cache) lives there, not here, so a
/// single dispatcher can serve any number of contexts.
pub struct Dispatcher {
    config: EgressConfig,
}

impl Dispatcher {
    pub fn new(config: EgressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EgressConfig {
        &self.config
    }

    /// GET, returning the response body.
    ///
    /// With `encode_errors`, transport and status failures come back as an
    /// `error=fetch_url&...` payload in the returned string; without it they
    /// are errors.
    pub fn get(
        &self,
        ctx: &mut RequestContext,
        url: &str,
        headers: &HeaderSet,
        encode_errors: bool,
    ) -> Result<String, HttpError> {
        let outcome = TransportClient::new(&self.config).perform(
            ctx,
            &FetchRequest {
                method: "GET",
                url,
                headers,
                content_type: None,
                body: None,
                encode_errors,
                missing_as_not_found: false,
            },
        )?;
        Self::collapse(outcome)
    }

    /// GET where a 404 means "absent" rather than a failure.
    ///
    /// Returns `None` exactly for a 404; other failures follow the same
    /// encoded-vs-error split as [`get`](Dispatcher::get).
    pub fn get_optional(
        &self,
        ctx: &mut RequestContext,
        url: &str,
        headers: &HeaderSet,
        encode_errors: bool,
    ) -> Result<Option<String>, HttpError> {
        let outcome = TransportClient::new(&self.config).perform(
            ctx,
            &FetchRequest {
                method: "GET",
                url,
                headers,
                content_type: None,
                body: None,
                encode_errors,
                missing_as_not_found: true,
            },
        )?;
        Ok(outcome.into_body())
    }

    pub fn post(
        &self,
        ctx: &mut RequestContext,
        url: &str,
        headers: &HeaderSet,
        content_type: &str,
        body: &str,
    ) -> Result<String, HttpError> {
        self.mutate(ctx, "POST", url, headers, Some(content_type), Some(body))
    }

    pub fn put(
        &self,
        ctx: &mut RequestContext,
        url: &str,
        headers: &HeaderSet,
        content_type: &str,
        body: &str,
    ) -> Result<String, HttpError> {
        self.mutate(ctx, "PUT", url, headers, Some(content_type), Some(body))
    }

    pub fn patch(
        &self,
        ctx: &mut RequestContext,
        url: &str,
        headers: &HeaderSet,
        content_type: &str,
        body: &str,
    ) -> Result<String, HttpError> {
        self.mutate(ctx, "PATCH", url, headers, Some(content_type), Some(body))
    }

    pub fn delete(
        &self,
        ctx: &mut RequestContext,
        url: &str,
        headers: &HeaderSet,
    ) -> Result<String, HttpError> {
        self.mutate(ctx, "DELETE", url, headers, None, None)
    }

    /// Status code recorded by the most recent attempt in `ctx`; 200 if no
    /// request has been made yet.
    pub fn last_error_code(&self, ctx: &RequestContext) -> u16 {
        ctx.last_status()
    }

    /// Cache-guarded dispatch shared by the mutating verbs.
    ///
    /// The slot is consulted before the network and overwritten
    /// unconditionally after it, so an immediate identical retry is served
    /// from memory and anything else replaces the slot.
    fn mutate(
        &self,
        ctx: &mut RequestContext,
        verb: &str,
        url: &str,
        headers: &HeaderSet,
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<String, HttpError> {
        let body_key = body.unwrap_or("");
        if let Some(response) = ctx.cache.lookup(verb, url, body_key)? {
            tracing::debug!(verb, url, "served from retry cache");
            metrics::record_cache_hit(verb);
            return Ok(response);
        }

        let outcome = TransportClient::new(&self.config).perform(
            ctx,
            &FetchRequest {
                method: verb,
                url,
                headers,
                content_type,
                body,
                encode_errors: false,
                missing_as_not_found: false,
            },
        )?;
        let response = Self::collapse(outcome)?;
        ctx.cache.store(verb, url, body_key, &response);
        Ok(response)
    }

    /// Collapse an outcome into the single string the caller receives.
    ///
    /// `Missing` can only arise under the not-found carve-out; mapping it to
    /// a 404 status error keeps this total.
    fn collapse(outcome: FetchOutcome) -> Result<String, HttpError> {
        outcome.into_body().ok_or(HttpError::Status {
            status: 404,
            body: String::new(),
        })
    }
}
