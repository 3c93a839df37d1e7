//! Signature engine: RSA-SHA256 signing, HMAC-SHA256 keyed signing, and
//! scrypt password-hash derivation.
//!
//! All three operations are pure functions of their inputs — no shared state,
//! no I/O — and return an opaque [`ByteSignature`]. Failures are terminal for
//! the operation; a partial signature is never produced.

pub mod hmac;
pub mod rsa;
pub mod scrypt;
pub mod signature;

pub use hmac::sign_hs256;
pub use rsa::sign_rs256;
pub use scrypt::scrypt;
pub use signature::ByteSignature;

use thiserror::Error;

/// Errors from the signature engine.
#[derive(Debug, Error)]
pub enum SigningError {
    /// Private key could not be parsed from PEM.
    #[error("cannot parse private key: {0}")]
    InvalidKey(String),

    /// A signing or derivation primitive failed.
    #[error("{operation} failed: {message}")]
    Primitive {
        operation: &'static str,
        message: String,
    },

    /// Signature byte index outside `[0, len)`.
    #[error("signature byte index {index} out of range for length {len}")]
    ByteIndex { index: usize, len: usize },
}
