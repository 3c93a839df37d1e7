//! scrypt password-hash derivation.

use scrypt::Params;

use crate::observability::metrics;
use crate::signing::{ByteSignature, SigningError};

/// Cost parameters: N = 2^10 = 1024, r = 1, p = 1.
///
/// Far below current recommendations, but they must stay fixed: every
/// previously derived hash was produced with these values, and changing them
/// would invalidate all of them. Integrators wanting stronger hashing need a
/// separate, versioned derivation.
pub const SCRYPT_LOG_N: u8 = 10;
pub const SCRYPT_R: u32 = 1;
pub const SCRYPT_P: u32 = 1;

/// Derived output length in bytes.
pub const SCRYPT_OUTPUT_LEN: usize = 32;

/// Derive 32 bytes from `password` and `salt` with the fixed cost
/// parameters above.
///
/// Deterministic for fixed parameters; safe to call concurrently.
pub fn scrypt(password: &str, salt: &str) -> Result<ByteSignature, SigningError> {
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, SCRYPT_OUTPUT_LEN).map_err(|e| {
        SigningError::Primitive {
            operation: "scrypt parameter setup",
            message: e.to_string(),
        }
    })?;

    let mut output = [0u8; SCRYPT_OUTPUT_LEN];
    scrypt::scrypt(password.as_bytes(), salt.as_bytes(), &params, &mut output).map_err(|e| {
        SigningError::Primitive {
            operation: "scrypt derivation",
            message: e.to_string(),
        }
    })?;

    metrics::record_signature("scrypt");
    Ok(ByteSignature::new(output.to_vec()))
}
