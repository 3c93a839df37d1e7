//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files;
//! every field has a default so a minimal (or absent) config works.

use serde::{Deserialize, Serialize};

/// Configuration for the outbound client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EgressConfig {
    /// User-Agent header injected first into every outbound request.
    pub user_agent: String,

    /// Upper bound on buffered response bytes. Exceeding it aborts the
    /// request in every error-reporting mode.
    pub max_response_bytes: usize,

    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// End-to-end request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for EgressConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_response_bytes: default_max_response_bytes(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_user_agent() -> String {
    format!("egress/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_response_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}
