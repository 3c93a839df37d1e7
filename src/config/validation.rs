//! Configuration validation.
//!
//! Semantic checks over a syntactically valid config. All failures are
//! collected and reported together, not just the first.

use std::fmt;

use crate::config::schema::EgressConfig;

/// A single validation failure.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate value ranges; serde has already handled the syntax.
pub fn validate_config(config: &EgressConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.user_agent.is_empty() {
        errors.push(ValidationError {
            field: "user_agent",
            message: "must not be empty".to_string(),
        });
    }
    if config.max_response_bytes == 0 {
        errors.push(ValidationError {
            field: "max_response_bytes",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.connect_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "connect_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
