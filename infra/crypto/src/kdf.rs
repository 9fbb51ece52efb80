//! # Key Derivation
//!
//! Turns a master key and a salt into engine key material with HKDF-SHA256.
//! Derivation is deterministic: the randomness of every ciphertext comes from its nonce.

use crate::error::CryptoError;
use crate::types::{DEFAULT_KDF_INFO, KEY_LEN};
use hkdf::Hkdf;
use sha2::Sha256;
use std::borrow::Cow;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Upper bound HKDF-SHA256 can expand to (`255 * HashLen`).
const MAX_OUTPUT_LEN: usize = 255 * 32;

/// A 256-bit engine key, wiped from memory when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for DerivedKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// HKDF-SHA256 key deriver bound to an application `info` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDeriver {
    info: Cow<'static, str>,
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self { info: Cow::Borrowed(DEFAULT_KDF_INFO) }
    }
}

impl KeyDeriver {
    /// Creates a deriver that separates its keys from other applications with `info`.
    #[must_use]
    pub fn new(info: impl Into<Cow<'static, str>>) -> Self {
        Self { info: info.into() }
    }

    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Derives a 32-byte engine key.
    ///
    /// # Errors
    /// None in practice; the error path exists because HKDF expansion is fallible in general.
    pub fn derive(
        &self,
        master_key: impl AsRef<[u8]>,
        salt: impl AsRef<[u8]>,
    ) -> Result<DerivedKey, CryptoError> {
        let mut key = DerivedKey([0u8; KEY_LEN]);
        self.derive_into(master_key, salt, &mut key.0)?;
        Ok(key)
    }

    /// Fills `out` with key material of `out.len()` bytes.
    ///
    /// A zero-length master key is accepted; choosing a strong one is the caller's job.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidConfiguration`] if `out` is empty or longer than
    /// HKDF-SHA256 can produce (8160 bytes).
    pub fn derive_into(
        &self,
        master_key: impl AsRef<[u8]>,
        salt: impl AsRef<[u8]>,
        out: &mut [u8],
    ) -> Result<(), CryptoError> {
        if out.is_empty() || out.len() > MAX_OUTPUT_LEN {
            return Err(CryptoError::InvalidConfiguration {
                message: format!(
                    "Requested {} bytes of key material, expected 1..={MAX_OUTPUT_LEN}",
                    out.len()
                )
                .into(),
                context: Some("HKDF output length".into()),
            });
        }

        let hk = Hkdf::<Sha256>::new(Some(salt.as_ref()), master_key.as_ref());
        hk.expand(self.info.as_bytes(), out).map_err(|_| CryptoError::InvalidConfiguration {
            message: "HKDF expansion failed".into(),
            context: Some("HKDF output length".into()),
        })
    }
}
