//! Process-wide HTTPS-only policy.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::http::HttpError;

static ALLOW_HTTP: AtomicBool = AtomicBool::new(false);

/// Permit plain-HTTP URLs for the remainder of the process lifetime.
///
/// The transition is monotonic: once enabled there is no way to restore the
/// HTTPS-only default. Concurrent callers are harmless since the write is
/// idempotent.
pub fn allow_http() {
    ALLOW_HTTP.store(true, Ordering::Relaxed);
    tracing::warn!("plain HTTP permitted process-wide");
}

/// Whether plain-HTTP URLs are currently permitted.
pub fn http_allowed() -> bool {
    ALLOW_HTTP.load(Ordering::Relaxed)
}

/// Gate a URL against the policy.
///
/// `https://` URLs always pass. `http://` URLs pass only after
/// [`allow_http`] has been called. Everything else is rejected.
pub fn check_url(url: &str) -> Result<(), HttpError> {
    if url.starts_with("https://") {
        return Ok(());
    }
    if url.starts_with("http://") && http_allowed() {
        return Ok(());
    }
    Err(HttpError::PolicyViolation {
        url: url.to_string(),
    })
}
