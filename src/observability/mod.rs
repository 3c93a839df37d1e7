//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! pipeline and signature engine produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → subscriber installed by the embedding binary (stdout by default)
//!     → whatever metrics recorder the application registers
//! ```
//!
//! # Design Decisions
//! - The library only emits; subscriber and recorder setup belong to the
//!   application
//! - Metric updates are cheap atomic increments
//! - No header values or key material in any event

pub mod logging;
pub mod metrics;
