use super::{EngineAdapter, init_cipher, random_nonce, split_frame};
use crate::error::CryptoError;
use crate::types::{Engine, MARKER_LEN, TAG_LEN};
use aead::AeadInOut;
use aead::inout::InOutBuf;
use chacha20poly1305::XChaCha20Poly1305;
use tracing::debug;
use zeroize::Zeroize;

const NONCE_LEN: usize = 24;

/// XChaCha20-Poly1305 adapter with the secretbox-style frame.
///
/// ```text
/// [s:][NONCE(24)][CIPHERTEXT(N)][TAG(16)]
/// ```
///
/// The 192-bit nonce makes random nonces safe for any realistic message volume per key.
#[derive(Debug, Clone, Copy, Default)]
pub struct SodiumAead;

impl EngineAdapter for SodiumAead {
    fn engine(&self) -> Engine {
        Engine::Sodium
    }

    fn encrypt(&self, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let cipher: XChaCha20Poly1305 = init_cipher(key)?;
        let nonce = random_nonce::<XChaCha20Poly1305>()?;

        let mut buf = Vec::with_capacity(MARKER_LEN + NONCE_LEN + plaintext.len() + TAG_LEN);
        buf.extend_from_slice(Engine::Sodium.marker());
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(plaintext);

        let (_head, body) = buf.split_at_mut(MARKER_LEN + NONCE_LEN);
        let tag = cipher
            .encrypt_inout_detached(&nonce, &[], InOutBuf::from(body))
            .map_err(|_| CryptoError::Encryption {
                message: "Encryption failed".into(),
                context: Some("XChaCha20-Poly1305 seal".into()),
            })?;

        buf.extend_from_slice(tag.as_slice());
        Ok(buf)
    }

    fn decrypt(&self, framed: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let rest = split_frame(Engine::Sodium, framed)?;
        let (nonce, rest) = rest.split_at(NONCE_LEN);
        let (ciphertext, tag) = rest.split_at(rest.len() - TAG_LEN);

        let cipher: XChaCha20Poly1305 = init_cipher(key)?;
        let nonce = nonce
            .try_into()
            .map_err(|_| CryptoError::decryption_failed("Invalid nonce length"))?;
        let tag = tag
            .try_into()
            .map_err(|_| CryptoError::decryption_failed("Invalid tag length"))?;

        let mut buf = ciphertext.to_vec();
        if cipher
            .decrypt_inout_detached(&nonce, &[], InOutBuf::from(buf.as_mut_slice()), &tag)
            .is_err()
        {
            buf.zeroize();
            debug!(engine = %Engine::Sodium, len = framed.len(), "AEAD authentication failed");
            return Err(CryptoError::decryption_failed("XChaCha20-Poly1305 authentication failed"));
        }

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [0x24; 32];

    #[test]
    fn frame_layout() {
        let frame = SodiumAead.encrypt(b"hello", &KEY).unwrap();
        assert_eq!(&frame[..MARKER_LEN], b"s:");
        assert_eq!(frame.len(), MARKER_LEN + NONCE_LEN + 5 + TAG_LEN);
    }

    #[test]
    fn roundtrip_and_fresh_nonce() {
        let a = SodiumAead.encrypt(b"hello", &KEY).unwrap();
        let b = SodiumAead.encrypt(b"hello", &KEY).unwrap();
        assert_ne!(a, b);
        assert_eq!(SodiumAead.decrypt(&a, &KEY).unwrap(), b"hello");
    }

    #[test]
    fn every_byte_after_marker_is_authenticated() {
        let frame = SodiumAead.encrypt(b"sealed", &KEY).unwrap();
        for i in MARKER_LEN..frame.len() {
            let mut tampered = frame.clone();
            tampered[i] ^= 0x80;
            assert!(
                matches!(
                    SodiumAead.decrypt(&tampered, &KEY),
                    Err(CryptoError::DecryptionFailed { .. })
                ),
                "byte {i}"
            );
        }
    }

    #[test]
    fn wrong_key_is_rejected() {
        let frame = SodiumAead.encrypt(b"hello", &KEY).unwrap();
        assert!(matches!(
            SodiumAead.decrypt(&frame, &[0x25; 32]),
            Err(CryptoError::DecryptionFailed { .. })
        ));
    }

    #[test]
    fn empty_plaintext_has_minimum_length() {
        let frame = SodiumAead.encrypt(b"", &KEY).unwrap();
        assert_eq!(frame.len(), Engine::Sodium.min_frame_len());
        assert!(SodiumAead.decrypt(&frame, &KEY).unwrap().is_empty());
        assert!(matches!(
            SodiumAead.decrypt(&frame[..frame.len() - 1], &KEY),
            Err(CryptoError::DecryptionFailed { .. })
        ));
    }
}
