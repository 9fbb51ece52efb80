use crate::clock::{Clock, SystemClock};
use crate::error::CryptoError;
use crate::facade::{Inner, MasterKey, SecureCrypto};
use crate::kdf::KeyDeriver;
use crate::types::{DEFAULT_SALT, Engine, EnginePreference, Mode};
use private::Sealed;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct NoKey;
#[derive(Debug)]
pub struct WithKey(MasterKey);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoKey {}
impl Sealed for WithKey {}

/// A builder for [`SecureCrypto`].
///
/// The master key is mandatory and enforced at compile time: `build` only exists once
/// [`SecureCryptoBuilder::master_key`] has been called. Raw key bytes held by the builder
/// are wiped when it is dropped.
#[allow(private_bounds)]
#[derive(Debug)]
pub struct SecureCryptoBuilder<K: Sealed = NoKey> {
    engine: EnginePreference,
    mode: Mode,
    default_salt: Option<Vec<u8>>,
    kdf_info: Option<Cow<'static, str>>,
    clock: Option<Arc<dyn Clock>>,
    key: K,
}

impl Default for SecureCryptoBuilder {
    fn default() -> Self {
        Self {
            engine: EnginePreference::Auto,
            mode: Mode::Standard,
            default_salt: None,
            kdf_info: None,
            clock: None,
            key: NoKey,
        }
    }
}

impl SecureCryptoBuilder {
    #[must_use = "Builder must be given a `master_key` before use"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the master key every per-call key is derived from.
    ///
    /// Any length is accepted, including empty; choosing a strong key is the caller's job.
    #[must_use]
    pub fn master_key(self, key: impl AsRef<[u8]>) -> SecureCryptoBuilder<WithKey> {
        SecureCryptoBuilder {
            engine: self.engine,
            mode: self.mode,
            default_salt: self.default_salt,
            kdf_info: self.kdf_info,
            clock: self.clock,
            key: WithKey(MasterKey::new(key.as_ref())),
        }
    }
}

#[allow(private_bounds)]
impl<K: Sealed> SecureCryptoBuilder<K> {
    /// Engine used for encryption. Decryption always follows the ciphertext's marker.
    #[must_use]
    pub fn engine(mut self, engine: impl Into<EnginePreference>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Text encoding for [`SecureCrypto::encrypt`] and [`SecureCrypto::decrypt`].
    #[must_use]
    pub const fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Salt used when a call does not pass its own.
    ///
    /// Without it, the crate-wide [`DEFAULT_SALT`] is used and `build` logs a warning.
    #[must_use]
    pub fn default_salt(mut self, salt: impl AsRef<[u8]>) -> Self {
        self.default_salt = Some(salt.as_ref().to_vec());
        self
    }

    /// HKDF `info` string. Instances with different info strings cannot read each other's data.
    #[must_use]
    pub fn kdf_info(mut self, info: impl Into<Cow<'static, str>>) -> Self {
        self.kdf_info = Some(info.into());
        self
    }

    /// Time source for token issuance and expiry. Defaults to [`SystemClock`].
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }
}

impl SecureCryptoBuilder<WithKey> {
    /// Resolves the engine and finalizes the instance.
    ///
    /// # Errors
    /// Returns [`CryptoError::EngineUnavailable`] if the requested engine, or any engine at all
    /// for [`EnginePreference::Auto`], is not compiled in.
    pub fn build(self) -> Result<SecureCrypto, CryptoError> {
        let engine = resolve_engine(self.engine)?;

        let default_salt = match self.default_salt {
            Some(salt) => salt,
            None => {
                warn!(
                    "No default salt configured; falling back to the built-in salt. \
                     Pass per-call salts or configure `default_salt`"
                );
                DEFAULT_SALT.as_bytes().to_vec()
            },
        };

        let kdf = self.kdf_info.map_or_else(KeyDeriver::default, KeyDeriver::new);
        debug!(%engine, mode = %self.mode, info = kdf.info(), "SecureCrypto initialized");

        let inner = Inner {
            master_key: self.key.0,
            engine,
            mode: self.mode,
            default_salt,
            kdf,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        };

        Ok(SecureCrypto { inner: Arc::new(inner) })
    }
}

/// Maps a preference onto an engine compiled into this build.
///
/// # Errors
/// Returns [`CryptoError::EngineUnavailable`] if no matching engine is compiled in.
pub fn resolve_engine(preference: EnginePreference) -> Result<Engine, CryptoError> {
    let engine = match preference {
        EnginePreference::Auto => Engine::ALL.into_iter().find(|e| e.is_available()),
        EnginePreference::OpenSsl => Some(Engine::OpenSsl).filter(|e| e.is_available()),
        EnginePreference::Sodium => Some(Engine::Sodium).filter(|e| e.is_available()),
    };

    engine.ok_or_else(|| CryptoError::EngineUnavailable {
        message: match preference {
            EnginePreference::Auto => "No encryption engine available".into(),
            other => format!("Engine '{other}' is not compiled into this build").into(),
        },
        context: Some("Engine selection".into()),
    })
}
