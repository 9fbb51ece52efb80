//! Authenticated encryption behind a single facade, with two interchangeable AEAD engines.
//!
//! [`SecureCrypto`] derives a per-call key with HKDF-SHA256, seals with the configured engine
//! under a fresh random nonce, and renders the result as text for the configured [`Mode`].
//!
//! ## Ciphertext Format
//!
//! The decoded bytes always start with a two-byte engine marker:
//!
//! ```text
//! OpenSSL (AES-256-GCM):        [o:][IV(12)][TAG(16)][CIPHERTEXT(N)]
//! Sodium  (XChaCha20-Poly1305): [s:][NONCE(24)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! Decryption dispatches on the marker, not on the instance's engine, so data sealed by
//! either engine stays readable after switching.
//!
//! ## Engines
//!
//! Each engine sits behind a Cargo feature (`engine-openssl`, `engine-sodium`, both on by
//! default). [`EnginePreference::Auto`] picks Sodium when it is compiled in, else OpenSSL.
//!
//! ## Salts
//!
//! Calls without an explicit salt use the instance default salt. When none is configured the
//! built-in [`DEFAULT_SALT`] applies and a warning is logged at construction: every instance
//! sharing a master key then derives the same key. Prefer
//! [`SecureCrypto::encrypt_salted`] or a per-deployment [`SecureCryptoBuilder::default_salt`].
//!
//! ## Nonce Policy
//!
//! Nonces are random and never reused on purpose. The 96-bit AES-GCM IV keeps the usual
//! birthday bound per derived key; the 192-bit XChaCha20 nonce does not need one in practice.
//!
//! ## Examples
//!
//! ### Tokens
//! ```rust
//! use veil_crypto::prelude::*;
//!
//! # fn main() -> Result<(), CryptoError> {
//! let clock = ManualClock::new(1_700_000_000);
//! let crypto = SecureCrypto::builder()
//!     .master_key("master-secret")
//!     .default_salt("salt")
//!     .clock(clock.clone())
//!     .build()?;
//!
//! let token = crypto.encrypt_for_token("user:42", 1800)?;
//! clock.advance(1700);
//! assert_eq!(crypto.decrypt_from_token(&token)?, "user:42");
//!
//! clock.advance(200);
//! assert!(matches!(crypto.decrypt_from_token(&token), Err(CryptoError::TokenExpired { .. })));
//! # Ok(())
//! # }
//! ```

mod builder;
mod clock;
pub mod codec;
mod config;
pub mod engine;
mod error;
mod facade;
mod helpers;
pub mod kdf;
mod signature;
mod token;
mod types;

pub use builder::{NoKey, SecureCryptoBuilder, WithKey, resolve_engine};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CryptoConfig, ENV_PREFIX, load_config};
pub use error::{CryptoError, CryptoErrorExt};
pub use facade::SecureCrypto;
pub use helpers::{generate_secure_random, secure_compare};
pub use kdf::{DerivedKey, KeyDeriver};
pub use signature::{verify_json_signature, verify_signature};
pub use token::{TokenEnvelope, TokenPayload};
pub use types::{
    CryptoInfo, DEFAULT_KDF_INFO, DEFAULT_SALT, Engine, EnginePreference, KEY_LEN, MARKER_LEN, Mode,
    TAG_LEN,
};

pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::error::{CryptoError, CryptoErrorExt};
    pub use crate::facade::SecureCrypto;
    pub use crate::types::{Engine, EnginePreference, Mode};
}
