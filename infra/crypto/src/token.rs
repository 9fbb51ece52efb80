//! # Token Envelope
//!
//! Wraps a string with issue and expiry instants before it is sealed:
//!
//! ```json
//! {"data":"...","issued_at":1700000000,"expires_at":1700001800}
//! ```
//!
//! `expires_at == 0` means the token never expires. Expiry is exclusive: a token is still
//! valid at exactly `expires_at`. Payloads written by the legacy format (`timestamp`/`iat`,
//! `exp`) are accepted; only `data` is required.

use crate::error::CryptoError;
use serde::{Deserialize, Serialize};

/// Plaintext of a token before encryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub data: String,
    #[serde(default, alias = "iat", alias = "timestamp")]
    pub issued_at: i64,
    #[serde(default, alias = "exp")]
    pub expires_at: i64,
}

impl TokenPayload {
    /// Whether the token is past its expiry at `now`.
    #[must_use]
    pub const fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at != 0 && now > self.expires_at
    }

    /// Serializes the payload to compact JSON.
    ///
    /// # Errors
    /// Returns [`CryptoError::Serialization`] if JSON encoding fails.
    pub fn to_json(&self) -> Result<String, CryptoError> {
        serde_json::to_string(self).map_err(|source| CryptoError::Serialization {
            source,
            context: Some("Token payload".into()),
        })
    }
}

/// Stateless wrap/unwrap of [`TokenPayload`]s against an explicit `now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenEnvelope;

impl TokenEnvelope {
    /// Builds a payload issued at `now`.
    ///
    /// `ttl_seconds == 0` never expires; a negative ttl yields a token that is already expired.
    /// A non-zero ttl whose expiry lands on `0` is stored as `-1`, since `0` is reserved for
    /// tokens that never expire.
    #[must_use]
    pub fn wrap(data: impl Into<String>, ttl_seconds: i64, now: i64) -> TokenPayload {
        let expires_at = match (ttl_seconds, now.saturating_add(ttl_seconds)) {
            (0, _) => 0,
            (_, 0) => -1,
            (_, at) => at,
        };
        TokenPayload { data: data.into(), issued_at: now, expires_at }
    }

    /// Parses a serialized payload and returns its data if it is still valid at `now`.
    ///
    /// # Errors
    /// * [`CryptoError::MalformedToken`] If the JSON is invalid or `data` is missing.
    /// * [`CryptoError::TokenExpired`] If `now` is past `expires_at`.
    pub fn unwrap(serialized: &str, now: i64) -> Result<String, CryptoError> {
        let payload: TokenPayload =
            serde_json::from_str(serialized).map_err(|e| CryptoError::MalformedToken {
                message: e.to_string().into(),
                context: Some("Token payload".into()),
            })?;

        if payload.is_expired_at(now) {
            return Err(CryptoError::TokenExpired { expires_at: payload.expires_at, now });
        }

        Ok(payload.data)
    }
}
