//! Stand-alone primitives that do not need a [`crate::SecureCrypto`] instance.

use crate::codec;
use crate::error::CryptoError;
use crate::types::Mode;
use getrandom::fill;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Returns `len` bytes from the OS CSPRNG as text.
///
/// The bytes are rendered as lowercase hex (`2 * len` chars), or as unpadded URL-safe
/// base64 when `url_safe` is set.
///
/// # Errors
/// Returns [`CryptoError::Internal`] if the system RNG is unavailable.
pub fn generate_secure_random(len: usize, url_safe: bool) -> Result<String, CryptoError> {
    let mut bytes = vec![0u8; len];
    fill(&mut bytes).map_err(|e| CryptoError::Internal {
        message: e.to_string().into(),
        context: Some("System RNG unavailable".into()),
    })?;

    let text = codec::encode(if url_safe { Mode::UrlSafe } else { Mode::Compact }, &bytes);
    bytes.zeroize();
    Ok(text)
}

/// Compares a secret with user input without leaking where they differ.
///
/// Inputs of different lengths return `false` immediately; only the length is revealed.
#[must_use]
pub fn secure_compare(known: impl AsRef<[u8]>, user: impl AsRef<[u8]>) -> bool {
    let (known, user) = (known.as_ref(), user.as_ref());
    known.len() == user.len() && bool::from(known.ct_eq(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_hex_has_expected_shape() {
        let token = generate_secure_random(32, false).unwrap();
        assert_eq!(token.len(), 64);
        assert!(token.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
        assert_ne!(token, generate_secure_random(32, false).unwrap());
    }

    #[test]
    fn random_url_safe_has_no_reserved_chars() {
        let token = generate_secure_random(33, true).unwrap();
        assert_eq!(token.len(), 44);
        assert!(!token.contains(['+', '/', '=']));
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(generate_secure_random(0, false).unwrap(), "");
    }

    #[test]
    fn compare() {
        assert!(secure_compare("api-key-123", "api-key-123"));
        assert!(!secure_compare("api-key-123", "api-key-124"));
        assert!(!secure_compare("api-key-123", "api-key-12"));
        assert!(secure_compare("", ""));
    }
}
