//! # Engine Adapters
//!
//! Each adapter seals raw bytes into a self-describing frame and opens it again:
//!
//! ```text
//! OpenSSL: [o:][IV(12)][TAG(16)][CIPHERTEXT(N)]
//! Sodium:  [s:][NONCE(24)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! Adapters never see text; encoding is the caller's concern. Every call draws a fresh
//! nonce from the OS CSPRNG. Opening never yields plaintext unless the tag verifies.

#[cfg(feature = "engine-openssl")]
mod openssl;
#[cfg(feature = "engine-sodium")]
mod sodium;

#[cfg(feature = "engine-openssl")]
pub use openssl::OpenSslAead;
#[cfg(feature = "engine-sodium")]
pub use sodium::SodiumAead;

use crate::error::CryptoError;
use crate::types::Engine;
use std::fmt::Debug;

/// One AEAD engine behind the common frame contract.
pub trait EngineAdapter: Debug + Send + Sync {
    /// The engine whose marker this adapter writes and accepts.
    fn engine(&self) -> Engine;

    /// Seals `plaintext` under a 32-byte `key` into a marked frame.
    ///
    /// # Errors
    /// * [`CryptoError::InvalidConfiguration`] If the key is not 32 bytes.
    /// * [`CryptoError::Encryption`] If the RNG or the AEAD primitive fails.
    fn encrypt(&self, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Verifies and opens a frame produced by [`EngineAdapter::encrypt`].
    ///
    /// # Errors
    /// * [`CryptoError::UnrecognizedFormat`] If the frame carries another engine's marker.
    /// * [`CryptoError::DecryptionFailed`] If the frame is truncated or fails authentication.
    /// * [`CryptoError::InvalidConfiguration`] If the key is not 32 bytes.
    fn decrypt(&self, framed: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Returns the adapter for `engine`.
///
/// # Errors
/// Returns [`CryptoError::EngineUnavailable`] if the engine's feature is disabled.
pub fn adapter(engine: Engine) -> Result<&'static dyn EngineAdapter, CryptoError> {
    match engine {
        #[cfg(feature = "engine-openssl")]
        Engine::OpenSsl => Ok(&OpenSslAead),
        #[cfg(feature = "engine-sodium")]
        Engine::Sodium => Ok(&SodiumAead),
        #[allow(unreachable_patterns)]
        other => Err(CryptoError::EngineUnavailable {
            message: format!("Engine '{other}' is not compiled into this build").into(),
            context: Some(format!("enable the `engine-{other}` feature").into()),
        }),
    }
}

#[cfg(any(feature = "engine-openssl", feature = "engine-sodium"))]
pub(crate) use cipher::{init_cipher, random_nonce, split_frame};

#[cfg(any(feature = "engine-openssl", feature = "engine-sodium"))]
mod cipher {
    use crate::error::CryptoError;
    use crate::types::{Engine, KEY_LEN, MARKER_LEN};
    use aead::{AeadInOut, Key, KeyInit, Nonce};
    use getrandom::fill;

    pub(crate) trait FrameCipher: AeadInOut + KeyInit + 'static {}
    impl<T: AeadInOut + KeyInit + 'static> FrameCipher for T {}

    pub(crate) fn init_cipher<C: FrameCipher>(key: &[u8]) -> Result<C, CryptoError> {
        let key = Key::<C>::try_from(key).map_err(|_| CryptoError::InvalidConfiguration {
            message: format!("Invalid key length {}, must be {KEY_LEN} bytes", key.len()).into(),
            context: Some("Engine key".into()),
        })?;
        Ok(C::new(&key))
    }

    pub(crate) fn random_nonce<C: FrameCipher>() -> Result<Nonce<C>, CryptoError> {
        let mut nonce = Nonce::<C>::default();
        fill(&mut nonce).map_err(|e| CryptoError::Encryption {
            message: e.to_string().into(),
            context: Some("System RNG unavailable for nonce generation".into()),
        })?;
        Ok(nonce)
    }

    /// Checks marker and minimum length, then returns the frame without its marker.
    pub(crate) fn split_frame(engine: Engine, framed: &[u8]) -> Result<&[u8], CryptoError> {
        if Engine::from_marker(framed) != Some(engine) {
            return Err(CryptoError::unrecognized_format("Frame marker does not match engine"));
        }
        if framed.len() < engine.min_frame_len() {
            return Err(CryptoError::decryption_failed("Frame shorter than nonce and tag"));
        }
        Ok(&framed[MARKER_LEN..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapters_report_their_engine() {
        for engine in Engine::ALL.into_iter().filter(|e| e.is_available()) {
            assert_eq!(adapter(engine).unwrap().engine(), engine);
        }
    }

    #[cfg(all(feature = "engine-openssl", feature = "engine-sodium"))]
    #[test]
    fn adapters_refuse_each_others_frames() {
        let key = [7u8; 32];
        let openssl = adapter(Engine::OpenSsl).unwrap();
        let sodium = adapter(Engine::Sodium).unwrap();

        let o_frame = openssl.encrypt(b"payload", &key).unwrap();
        let s_frame = sodium.encrypt(b"payload", &key).unwrap();

        assert!(matches!(
            sodium.decrypt(&o_frame, &key),
            Err(CryptoError::UnrecognizedFormat { .. })
        ));
        assert!(matches!(
            openssl.decrypt(&s_frame, &key),
            Err(CryptoError::UnrecognizedFormat { .. })
        ));
    }

    #[test]
    fn rejects_short_keys() {
        for engine in Engine::ALL.into_iter().filter(|e| e.is_available()) {
            let err = adapter(engine).unwrap().encrypt(b"data", &[1u8; 16]).unwrap_err();
            assert!(matches!(err, CryptoError::InvalidConfiguration { .. }));
        }
    }
}
