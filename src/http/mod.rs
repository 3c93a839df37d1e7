//! Outbound HTTP pipeline.
//!
//! # Data Flow
//! ```text
//! dispatch entry point
//!     → cache.rs (mutating verbs: single-slot lookup)
//!     → policy.rs (HTTPS-only gate)
//!     → headers.rs (user-agent + caller headers + content type)
//!     → transport.rs (blocking request, stream into bounded buffer)
//!     → buffer.rs (capacity-limited accumulation)
//!     → outcome classification (body / encoded error / missing / fatal)
//!     → cache.rs (mutating verbs: unconditional store)
//! ```

pub mod buffer;
pub mod cache;
pub mod headers;
pub mod policy;
pub mod transport;

pub use buffer::ResponseBuffer;
pub use cache::{CacheEntry, RequestCache};
pub use headers::HeaderSet;
pub use transport::{FetchOutcome, FetchRequest, PreparedRequest, Transport, TransportClient};

use thiserror::Error;

/// Errors raised while dispatching an outbound request.
///
/// Every variant terminates the current unit of work when propagated; the
/// encoded-error mode returns failures through the normal string channel
/// instead and never produces one of these.
#[derive(Debug, Error)]
pub enum HttpError {
    /// URL is not HTTPS and the plain-HTTP escape hatch is off.
    #[error("URL is not HTTPS: {url}")]
    PolicyViolation { url: String },

    /// DNS, connect, TLS, or protocol-level failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Server answered with a status outside the accepted set.
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response overran the configured buffer limit.
    #[error("response exceeded {limit} bytes")]
    CapacityExceeded { limit: usize },

    /// Cache slot matched on key but holds no response.
    #[error("missing response in cache")]
    CacheInconsistency,

    /// Assembled header list came out empty. The injected user-agent header
    /// makes this unreachable unless header assembly itself is broken.
    #[error("internal: empty header list")]
    EmptyHeaderList,
}
