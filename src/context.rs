//! Per-unit-of-work execution state.

use crate::config::EgressConfig;
use crate::http::cache::RequestCache;
use crate::http::transport::{ReqwestTransport, Transport};
use crate::http::HttpError;

/// Status reported before any request has been made in a context.
const DEFAULT_STATUS: u16 = 200;

/// State owned by one unit of work (one request-handling session).
///
/// Holds the lazily created transport, the most recently observed status
/// code, and the single-slot retry cache. `&mut` access serializes every
/// dispatch within a context; nothing here is shared across contexts.
/// Dropping the context releases the transport and its connections on every
/// exit path.
pub struct RequestContext {
    transport: Option<Box<dyn Transport>>,
    last_status: u16,
    pub(crate) cache: RequestCache,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            transport: None,
            last_status: DEFAULT_STATUS,
            cache: RequestCache::default(),
        }
    }

    /// Context with a caller-supplied transport.
    ///
    /// Used by tests to substitute a scripted double and observe network
    /// calls; production callers let the context build its own transport on
    /// first use.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
            last_status: DEFAULT_STATUS,
            cache: RequestCache::default(),
        }
    }

    /// The context's reusable transport, created on first use.
    pub(crate) fn transport(
        &mut self,
        config: &EgressConfig,
    ) -> Result<&mut dyn Transport, HttpError> {
        match &mut self.transport {
            Some(transport) => Ok(transport.as_mut()),
            slot @ None => {
                tracing::debug!("initializing outbound transport for context");
                let transport: Box<dyn Transport> = Box::new(ReqwestTransport::new(config)?);
                Ok(slot.insert(transport).as_mut())
            }
        }
    }

    pub(crate) fn record_status(&mut self, status: u16) {
        self.last_status = status;
    }

    /// Most recently observed HTTP status; 200 before any request.
    pub fn last_status(&self) -> u16 {
        self.last_status
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
