//! RSA PKCS#1 v1.5 signing with SHA-256.

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha2::Sha256;

use crate::observability::metrics;
use crate::signing::{ByteSignature, SigningError};

/// RSA PKCS#1 v1.5 signature over the SHA-256 digest of `message`, with the
/// SHA-256 algorithm identifier embedded in the padding.
///
/// Deterministic for a given key and message. Key parsing and signing
/// failures are reported separately; both are terminal.
pub fn sign_rs256(private_key_pem: &str, message: &str) -> Result<ByteSignature, SigningError> {
    let private_key = parse_private_key(private_key_pem)?;
    let signing_key = SigningKey::<Sha256>::new(private_key);

    let signature = signing_key
        .try_sign(message.as_bytes())
        .map_err(|e| SigningError::Primitive {
            operation: "RSA signing",
            message: e.to_string(),
        })?;

    metrics::record_signature("rs256");
    Ok(ByteSignature::new(signature.to_vec()))
}

/// Parse a PEM private key, accepting both PKCS#8 (`BEGIN PRIVATE KEY`) and
/// PKCS#1 (`BEGIN RSA PRIVATE KEY`) encodings.
fn parse_private_key(pem: &str) -> Result<RsaPrivateKey, SigningError> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| SigningError::InvalidKey(e.to_string()))
}
