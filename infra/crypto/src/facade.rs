use crate::builder::SecureCryptoBuilder;
use crate::clock::Clock;
use crate::codec;
use crate::config::CryptoConfig;
use crate::engine::adapter;
use crate::error::{CryptoError, CryptoErrorExt};
use crate::kdf::KeyDeriver;
use crate::token::TokenEnvelope;
use crate::types::{CryptoInfo, Engine, EnginePreference, Mode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Caller-supplied master key. Wiped on drop, never printed.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct MasterKey(Vec<u8>);

impl MasterKey {
    pub(crate) fn new(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(..)")
    }
}

#[derive(Debug)]
pub(crate) struct Inner {
    pub(crate) master_key: MasterKey,
    pub(crate) engine: Engine,
    pub(crate) mode: Mode,
    pub(crate) default_salt: Vec<u8>,
    pub(crate) kdf: KeyDeriver,
    pub(crate) clock: Arc<dyn Clock>,
}

/// Authenticated-encryption facade.
///
/// Every call derives a fresh engine key from the master key and a salt, seals with the
/// configured engine under a fresh nonce, and encodes the marked frame as text:
///
/// ```text
/// text = encode(mode, marker || engine frame)
/// ```
///
/// Decryption reads the engine from the marker, so an instance configured for one engine
/// opens ciphertext produced by the other as long as both are compiled in.
///
/// The instance is immutable and wraps its state in an [`Arc`]; clones are cheap and it can be
/// shared across threads.
///
/// ### Example
/// ```rust
/// use veil_crypto::prelude::*;
///
/// # fn main() -> Result<(), CryptoError> {
/// let crypto = SecureCrypto::builder()
///     .master_key("test_encryption_key_2024")
///     .default_salt("per-deployment-salt")
///     .mode(Mode::UrlSafe)
///     .build()?;
///
/// let sealed = crypto.encrypt("Hello, SecureCrypto!")?;
/// assert!(!sealed.contains(['+', '/', '=']));
/// assert_eq!(crypto.decrypt(&sealed)?, "Hello, SecureCrypto!");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SecureCrypto {
    pub(crate) inner: Arc<Inner>,
}

impl SecureCrypto {
    #[must_use]
    pub fn builder() -> SecureCryptoBuilder {
        SecureCryptoBuilder::new()
    }

    /// Shorthand for the builder with a master key, engine and mode.
    ///
    /// # Errors
    /// Returns [`CryptoError::EngineUnavailable`] if the engine is not compiled in.
    pub fn new(
        master_key: impl AsRef<[u8]>,
        engine: impl Into<EnginePreference>,
        mode: Mode,
    ) -> Result<Self, CryptoError> {
        Self::builder().master_key(master_key).engine(engine).mode(mode).build()
    }

    /// Builds an instance from loaded settings.
    ///
    /// # Errors
    /// * [`CryptoError::InvalidConfiguration`] If the master key is empty.
    /// * [`CryptoError::EngineUnavailable`] If the configured engine is not compiled in.
    pub fn from_config(config: &CryptoConfig) -> Result<Self, CryptoError> {
        if config.master_key.is_empty() {
            return Err(CryptoError::InvalidConfiguration {
                message: "Master key must not be empty".into(),
                context: Some("CryptoConfig.master_key".into()),
            });
        }

        let mut builder = Self::builder()
            .master_key(config.master_key.as_bytes())
            .engine(config.engine)
            .mode(config.mode);
        if let Some(salt) = &config.default_salt {
            builder = builder.default_salt(salt);
        }
        if let Some(info) = &config.kdf_info {
            builder = builder.kdf_info(info.clone());
        }
        builder.build()
    }

    // --- Accessors ---

    /// Engine used for encryption.
    #[must_use]
    pub fn engine(&self) -> Engine {
        self.inner.engine
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.inner.mode
    }

    #[must_use]
    pub fn info(&self) -> CryptoInfo {
        CryptoInfo {
            engine: self.inner.engine,
            mode: self.inner.mode,
            sodium_available: Engine::Sodium.is_available(),
            openssl_available: Engine::OpenSsl.is_available(),
            openssl_cipher: Engine::OpenSsl.cipher_name(),
            sodium_cipher: Engine::Sodium.cipher_name(),
        }
    }

    // --- Encrypt / Decrypt ---

    /// Encrypts a string with the default salt.
    ///
    /// # Errors
    /// Returns [`CryptoError::Encryption`] if the RNG or the AEAD primitive fails.
    pub fn encrypt(&self, plaintext: impl AsRef<str>) -> Result<String, CryptoError> {
        self.seal(self.inner.mode, plaintext.as_ref().as_bytes(), &self.inner.default_salt)
    }

    /// Encrypts a string under a per-call salt. The same salt must be given to decrypt.
    ///
    /// # Errors
    /// Returns [`CryptoError::Encryption`] if the RNG or the AEAD primitive fails.
    pub fn encrypt_salted(
        &self,
        plaintext: impl AsRef<str>,
        salt: impl AsRef<[u8]>,
    ) -> Result<String, CryptoError> {
        self.seal(self.inner.mode, plaintext.as_ref().as_bytes(), salt.as_ref())
    }

    /// Encrypts raw bytes, with the default salt when `salt` is `None`.
    ///
    /// # Errors
    /// Returns [`CryptoError::Encryption`] if the RNG or the AEAD primitive fails.
    pub fn encrypt_bytes(
        &self,
        bytes: impl AsRef<[u8]>,
        salt: Option<&[u8]>,
    ) -> Result<String, CryptoError> {
        self.seal(self.inner.mode, bytes.as_ref(), self.salt_or_default(salt))
    }

    /// Decrypts text produced by [`SecureCrypto::encrypt`].
    ///
    /// # Errors
    /// * [`CryptoError::Encoding`] If the text is not valid for the mode or the plaintext is
    ///   not UTF-8.
    /// * [`CryptoError::UnrecognizedFormat`] If the decoded bytes carry no known marker.
    /// * [`CryptoError::EngineUnavailable`] If the marker names an engine not compiled in.
    /// * [`CryptoError::DecryptionFailed`] On a wrong key or salt, truncation or tampering.
    pub fn decrypt(&self, text: impl AsRef<str>) -> Result<String, CryptoError> {
        let bytes = self.open(self.inner.mode, text.as_ref(), &self.inner.default_salt)?;
        into_utf8(bytes)
    }

    /// Decrypts text produced by [`SecureCrypto::encrypt_salted`].
    ///
    /// # Errors
    /// See [`SecureCrypto::decrypt`].
    pub fn decrypt_salted(
        &self,
        text: impl AsRef<str>,
        salt: impl AsRef<[u8]>,
    ) -> Result<String, CryptoError> {
        let bytes = self.open(self.inner.mode, text.as_ref(), salt.as_ref())?;
        into_utf8(bytes)
    }

    /// Decrypts to raw bytes, with the default salt when `salt` is `None`.
    ///
    /// # Errors
    /// See [`SecureCrypto::decrypt`], without the UTF-8 check.
    pub fn decrypt_bytes(
        &self,
        text: impl AsRef<str>,
        salt: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        self.open(self.inner.mode, text.as_ref(), self.salt_or_default(salt))
    }

    // --- URL ---

    /// Encrypts into URL-safe base64, whatever the instance mode.
    ///
    /// # Errors
    /// See [`SecureCrypto::encrypt`].
    pub fn encrypt_for_url(&self, plaintext: impl AsRef<str>) -> Result<String, CryptoError> {
        self.seal(Mode::UrlSafe, plaintext.as_ref().as_bytes(), &self.inner.default_salt)
    }

    /// Decrypts text produced by [`SecureCrypto::encrypt_for_url`].
    ///
    /// # Errors
    /// See [`SecureCrypto::decrypt`].
    pub fn decrypt_from_url(&self, text: impl AsRef<str>) -> Result<String, CryptoError> {
        into_utf8(self.open(Mode::UrlSafe, text.as_ref(), &self.inner.default_salt)?)
    }

    // --- Tokens ---

    /// Seals `data` in a token valid for `ttl_seconds` from the instance clock's now.
    ///
    /// `ttl_seconds == 0` never expires; a negative ttl is already expired.
    ///
    /// # Errors
    /// See [`SecureCrypto::encrypt`].
    pub fn encrypt_for_token(
        &self,
        data: impl Into<String>,
        ttl_seconds: i64,
    ) -> Result<String, CryptoError> {
        self.encrypt_for_token_at(data, ttl_seconds, self.inner.clock.now())
    }

    /// Like [`SecureCrypto::encrypt_for_token`] with an explicit issue time.
    ///
    /// # Errors
    /// See [`SecureCrypto::encrypt`].
    pub fn encrypt_for_token_at(
        &self,
        data: impl Into<String>,
        ttl_seconds: i64,
        now: i64,
    ) -> Result<String, CryptoError> {
        let json = TokenEnvelope::wrap(data, ttl_seconds, now).to_json()?;
        self.seal(Mode::Token, json.as_bytes(), &self.inner.default_salt)
    }

    /// Opens a token and checks its expiry against the instance clock.
    ///
    /// # Errors
    /// * [`CryptoError::TokenExpired`] If the token is past its expiry.
    /// * [`CryptoError::MalformedToken`] If the decrypted payload is not a token.
    /// * Any error of [`SecureCrypto::decrypt`].
    pub fn decrypt_from_token(&self, text: impl AsRef<str>) -> Result<String, CryptoError> {
        self.decrypt_from_token_at(text, self.inner.clock.now())
    }

    /// Like [`SecureCrypto::decrypt_from_token`] with an explicit `now`.
    ///
    /// # Errors
    /// See [`SecureCrypto::decrypt_from_token`].
    pub fn decrypt_from_token_at(
        &self,
        text: impl AsRef<str>,
        now: i64,
    ) -> Result<String, CryptoError> {
        let json = into_utf8(self.open(Mode::Token, text.as_ref(), &self.inner.default_salt)?)
            .map_err(|_| CryptoError::MalformedToken {
                message: "Token payload is not UTF-8".into(),
                context: None,
            })?;
        TokenEnvelope::unwrap(&json, now)
    }

    /// Seals any serializable value as the token's data.
    ///
    /// # Errors
    /// * [`CryptoError::Serialization`] If `value` cannot be serialized.
    /// * Any error of [`SecureCrypto::encrypt_for_token`].
    pub fn encrypt_value_for_token<T: Serialize>(
        &self,
        value: &T,
        ttl_seconds: i64,
    ) -> Result<String, CryptoError> {
        let data = serde_json::to_string(value).context("Token data")?;
        self.encrypt_for_token(data, ttl_seconds)
    }

    /// Opens a token sealed by [`SecureCrypto::encrypt_value_for_token`].
    ///
    /// # Errors
    /// * [`CryptoError::MalformedToken`] If the data does not deserialize into `T`.
    /// * Any error of [`SecureCrypto::decrypt_from_token`].
    pub fn decrypt_value_from_token<T: DeserializeOwned>(
        &self,
        text: impl AsRef<str>,
    ) -> Result<T, CryptoError> {
        let data = self.decrypt_from_token(text)?;
        serde_json::from_str(&data).map_err(|e| CryptoError::MalformedToken {
            message: e.to_string().into(),
            context: Some("Token data".into()),
        })
    }

    // --- Internals ---

    fn salt_or_default<'a>(&'a self, salt: Option<&'a [u8]>) -> &'a [u8] {
        salt.unwrap_or(&self.inner.default_salt)
    }

    fn seal(&self, mode: Mode, plaintext: &[u8], salt: &[u8]) -> Result<String, CryptoError> {
        let engine = self.inner.engine;
        let key = self.inner.kdf.derive(&self.inner.master_key.0, salt)?;
        let framed = adapter(engine)?.encrypt(plaintext, key.as_ref())?;

        debug!(%engine, %mode, len = plaintext.len(), "Encrypted payload");
        Ok(codec::encode(mode, framed))
    }

    fn open(&self, mode: Mode, text: &str, salt: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let framed = codec::decode(mode, text)?;
        let engine = Engine::from_marker(&framed)
            .ok_or_else(|| CryptoError::unrecognized_format("Decoded ciphertext"))?;
        let adapter = adapter(engine).context("Ciphertext produced by a disabled engine")?;

        let key = self.inner.kdf.derive(&self.inner.master_key.0, salt)?;
        let plaintext = adapter.decrypt(&framed, key.as_ref())?;

        debug!(%engine, %mode, len = plaintext.len(), "Decrypted payload");
        Ok(plaintext)
    }
}

fn into_utf8(bytes: Vec<u8>) -> Result<String, CryptoError> {
    String::from_utf8(bytes).map_err(|e| {
        let mut bytes = e.into_bytes();
        bytes.zeroize();
        CryptoError::Encoding {
            message: "Decrypted data is not valid UTF-8".into(),
            context: Some("Plaintext".into()),
        }
    })
}
