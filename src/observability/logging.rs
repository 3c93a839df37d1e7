//! Structured logging initialization.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize the tracing subscriber for a binary embedding this crate.
///
/// Library code only emits events; subscriber setup belongs to the
/// application. The filter defaults to `egress=info` and is overridable via
/// `RUST_LOG`. Header values and key material are never logged.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "egress=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
