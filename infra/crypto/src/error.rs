//! # Crypto Errors
//!
//! This module defines the [`CryptoError`] enum used throughout the crate for reporting
//! engine, encoding, authentication, token and configuration failures.
//!
//! [`CryptoError::DecryptionFailed`] and [`CryptoError::UnrecognizedFormat`] are *opaque*:
//! anything facing an untrusted peer should report both the same way
//! (see [`CryptoError::is_opaque`]).

use std::borrow::Cow;

/// A specialized [`CryptoError`] enum for crypto-related failures.
#[veil_derive::veil_error]
pub enum CryptoError {
    /// The requested engine is not compiled into this build.
    #[error("Engine unavailable{}: {message}", format_context(.context))]
    EngineUnavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Malformed text handed to the codec, or plaintext that is not valid UTF-8.
    #[error("Encoding error{}: {message}", format_context(.context))]
    Encoding { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Decoded bytes do not start with a known engine marker.
    #[veil(opaque)]
    #[error("Unrecognized ciphertext format{}: {message}", format_context(.context))]
    UnrecognizedFormat { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// AEAD authentication failed.
    ///
    /// Covers a wrong key, a wrong salt, tampered data and truncated frames.
    #[veil(opaque)]
    #[error("Decryption failed{}: {message}", format_context(.context))]
    DecryptionFailed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure while sealing (nonce generation or AEAD encryption).
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The token is past its `expires_at` instant.
    #[error("Token expired at {expires_at} (now {now})")]
    TokenExpired { expires_at: i64, now: i64 },

    /// The token payload does not parse or misses required fields.
    #[error("Malformed token{}: {message}", format_context(.context))]
    MalformedToken { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// JSON serialization failure.
    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Malformed Ed25519 key or signature bytes.
    #[error("Signature error{}: {source}", format_context(.context))]
    Signature { source: ed25519_dalek::SignatureError, context: Option<Cow<'static, str>> },

    /// Failure while loading layered configuration.
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    /// Failure when the facade or one of its parts is incorrectly configured.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal crypto error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CryptoError {
    pub(crate) fn decryption_failed(context: &'static str) -> Self {
        Self::DecryptionFailed {
            message: "Decryption failed".into(),
            context: Some(context.into()),
        }
    }

    pub(crate) fn unrecognized_format(context: &'static str) -> Self {
        Self::UnrecognizedFormat {
            message: "Unknown engine marker".into(),
            context: Some(context.into()),
        }
    }
}
