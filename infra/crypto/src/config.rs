use crate::error::{CryptoError, CryptoErrorExt};
use crate::types::{EnginePreference, Mode};
use config::{Config, Environment, File, Map};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Prefix of environment overrides, e.g. `VEIL__MASTER_KEY`.
pub const ENV_PREFIX: &str = "VEIL";

/// Settings for [`crate::SecureCrypto::from_config`].
///
/// ```toml
/// master_key = "change-me"
/// engine = "auto"          # auto | openssl | sodium
/// mode = "url_safe"        # standard | url_safe | token | compact
/// default_salt = "deployment-salt"
/// kdf_info = "my-app"
/// ```
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CryptoConfig {
    pub master_key: String,
    #[serde(default)]
    #[zeroize(skip)]
    pub engine: EnginePreference,
    #[serde(default)]
    #[zeroize(skip)]
    pub mode: Mode,
    #[serde(default)]
    pub default_salt: Option<String>,
    #[serde(default)]
    pub kdf_info: Option<String>,
}

impl CryptoConfig {
    /// Settings with the given key and every other field at its default.
    #[must_use]
    pub fn new(master_key: impl Into<String>) -> Self {
        Self {
            master_key: master_key.into(),
            engine: EnginePreference::default(),
            mode: Mode::default(),
            default_salt: None,
            kdf_info: None,
        }
    }
}

impl fmt::Debug for CryptoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoConfig")
            .field("master_key", &"<redacted>")
            .field("engine", &self.engine)
            .field("mode", &self.mode)
            .field("default_salt", &self.default_salt)
            .field("kdf_info", &self.kdf_info)
            .finish()
    }
}

/// Loads [`CryptoConfig`] from a file, overlaid with `VEIL__*` environment variables.
///
/// The file format follows its extension (`.toml`, `.json`, `.yaml`, ...).
///
/// # Errors
/// Returns [`CryptoError::Config`] if the file is missing, unreadable, or does not describe
/// a valid [`CryptoConfig`].
pub fn load_config(path: impl AsRef<Path>) -> Result<CryptoConfig, CryptoError> {
    load_layered(path.as_ref(), None)
}

/// Same as [`load_config`], reading overrides from `env` instead of the process environment.
pub(crate) fn load_layered(
    path: &Path,
    env: Option<Map<String, String>>,
) -> Result<CryptoConfig, CryptoError> {
    let builder = Config::builder().add_source(File::from(path).required(true)).add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .convert_case(config::Case::Snake)
            .source(env),
    );

    info!("Loading crypto config from {}", path.display());

    builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<CryptoConfig>()
        .context("Failed to deserialize config")
}
