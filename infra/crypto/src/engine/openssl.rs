use super::{EngineAdapter, init_cipher, random_nonce, split_frame};
use crate::error::CryptoError;
use crate::types::{Engine, MARKER_LEN, TAG_LEN};
use aead::AeadInOut;
use aead::inout::InOutBuf;
use aes_gcm::Aes256Gcm;
use tracing::debug;
use zeroize::Zeroize;

const IV_LEN: usize = 12;

/// AES-256-GCM adapter.
///
/// ```text
/// [o:][IV(12)][TAG(16)][CIPHERTEXT(N)]
/// ```
///
/// The tag sits in front of the ciphertext, matching the layout OpenSSL-based producers emit.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSslAead;

impl EngineAdapter for OpenSslAead {
    fn engine(&self) -> Engine {
        Engine::OpenSsl
    }

    fn encrypt(&self, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let cipher: Aes256Gcm = init_cipher(key)?;
        let iv = random_nonce::<Aes256Gcm>()?;

        let mut buf = Vec::with_capacity(MARKER_LEN + IV_LEN + TAG_LEN + plaintext.len());
        buf.extend_from_slice(Engine::OpenSsl.marker());
        buf.extend_from_slice(&iv);
        buf.resize(MARKER_LEN + IV_LEN + TAG_LEN, 0);
        buf.extend_from_slice(plaintext);

        let (head, body) = buf.split_at_mut(MARKER_LEN + IV_LEN + TAG_LEN);
        let tag = cipher
            .encrypt_inout_detached(&iv, &[], InOutBuf::from(body))
            .map_err(|_| CryptoError::Encryption {
                message: "Encryption failed".into(),
                context: Some("AES-256-GCM seal".into()),
            })?;
        head[MARKER_LEN + IV_LEN..].copy_from_slice(tag.as_slice());

        Ok(buf)
    }

    fn decrypt(&self, framed: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let rest = split_frame(Engine::OpenSsl, framed)?;
        let (iv, rest) = rest.split_at(IV_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);

        let cipher: Aes256Gcm = init_cipher(key)?;
        let iv = iv
            .try_into()
            .map_err(|_| CryptoError::decryption_failed("Invalid IV length"))?;
        let tag = tag
            .try_into()
            .map_err(|_| CryptoError::decryption_failed("Invalid tag length"))?;

        let mut buf = ciphertext.to_vec();
        let inout = InOutBuf::from(buf.as_mut_slice());
        if cipher.decrypt_inout_detached(&iv, &[], inout, &tag).is_err() {
            buf.zeroize();
            debug!(engine = %Engine::OpenSsl, len = framed.len(), "AEAD authentication failed");
            return Err(CryptoError::decryption_failed("AES-256-GCM authentication failed"));
        }

        Ok(buf)
    }
}
