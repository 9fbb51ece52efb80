//! Ed25519 signature checks for data handed over by third parties.

use crate::codec;
use crate::error::{CryptoError, CryptoErrorExt};
use crate::types::Mode;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::Serialize;

/// Verifies a standard-base64 Ed25519 `signature` over `data`.
///
/// # Returns
/// `Ok(false)` for a well-formed signature that does not match.
///
/// # Errors
/// * [`CryptoError::Encoding`] If the signature is not valid base64.
/// * [`CryptoError::Signature`] If the key is not a valid point or the signature has the
///   wrong length.
pub fn verify_signature(
    data: impl AsRef<[u8]>,
    signature: &str,
    public_key: &[u8; 32],
) -> Result<bool, CryptoError> {
    let signature = codec::decode(Mode::Standard, signature)?;
    let verifying_key = VerifyingKey::from_bytes(public_key).context("Public key")?;
    let signature = Signature::from_slice(&signature).context("Signature bytes")?;

    Ok(verifying_key.verify(data.as_ref(), &signature).is_ok())
}

/// Serializes `value` to compact JSON, then calls [`verify_signature`] on it.
///
/// # Errors
/// * [`CryptoError::Serialization`] If `value` cannot be serialized.
/// * Any error of [`verify_signature`].
pub fn verify_json_signature<T: Serialize>(
    value: &T,
    signature: &str,
    public_key: &[u8; 32],
) -> Result<bool, CryptoError> {
    let bytes = serde_json::to_vec(value).context("Signed JSON")?;
    verify_signature(bytes, signature, public_key)
}
