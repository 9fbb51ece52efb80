//! Facade crate for the veil workspace.
//! Re-exports the crypto core and, behind `logger`, the subscriber setup.
//! Keep this crate thin: it should compose other crates, not implement crypto logic.
//!
//! ## Usage
//! - Add `veil` with the desired engine features (`openssl`/`sodium`, both default).
//! - Call [`init`] with a config file to get a ready [`crypto::SecureCrypto`].

pub use veil_crypto as crypto;
#[cfg(feature = "logger")]
pub use veil_logger as logger;

pub use veil_crypto::prelude;

use std::path::Path;
use veil_crypto::{CryptoError, SecureCrypto};

/// Feature registry for runtime introspection.
pub mod features {
    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "openssl")]
        "openssl",
        #[cfg(feature = "sodium")]
        "sodium",
        #[cfg(feature = "logger")]
        "logger",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Loads settings from `path` (with `VEIL__*` overrides) and builds a [`SecureCrypto`].
///
/// # Errors
/// * [`CryptoError::Config`] If the settings cannot be loaded.
/// * Any error of [`SecureCrypto::from_config`].
pub fn init(path: impl AsRef<Path>) -> Result<SecureCrypto, CryptoError> {
    let config = veil_crypto::load_config(path)?;
    SecureCrypto::from_config(&config)
}
