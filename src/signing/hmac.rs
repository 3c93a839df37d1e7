//! HMAC-SHA256 keyed signing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::observability::metrics;
use crate::signing::{ByteSignature, SigningError};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 over `message` with `key`.
///
/// Deterministic: identical inputs always produce identical bytes. Keys of
/// any length are accepted per the HMAC construction.
pub fn sign_hs256(key: &str, message: &str) -> Result<ByteSignature, SigningError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).map_err(|e| {
        SigningError::Primitive {
            operation: "HMAC key setup",
            message: e.to_string(),
        }
    })?;
    mac.update(message.as_bytes());
    let tag = mac.finalize().into_bytes();

    metrics::record_signature("hs256");
    Ok(ByteSignature::new(tag.to_vec()))
}
