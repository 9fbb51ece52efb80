use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

// --- Frame format constants ---

/// Length of the ASCII engine marker that prefixes every frame.
pub const MARKER_LEN: usize = 2;

/// Authentication tag length shared by both engines (128-bit).
pub const TAG_LEN: usize = 16;

/// Symmetric key length required by both engines (256-bit).
pub const KEY_LEN: usize = 32;

/// Salt used when the caller supplies none.
///
/// Keys derived with this salt are identical for every call made with the same master key.
/// Prefer a per-use salt; see [`crate::SecureCryptoBuilder::default_salt`].
pub const DEFAULT_SALT: &str = "veil_secure_2024";

/// HKDF `info` string used for context separation.
pub const DEFAULT_KDF_INFO: &str = "veil-crypto";

// --- Engines ---

/// A concrete AEAD engine. The variant is recorded in every ciphertext as a two-byte marker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Engine {
    /// AES-256-GCM, frame `o: || IV(12) || TAG(16) || CT`.
    #[serde(rename = "openssl")]
    #[strum(serialize = "openssl")]
    OpenSsl,
    /// XChaCha20-Poly1305, frame `s: || NONCE(24) || CT || TAG(16)`.
    #[serde(rename = "sodium")]
    #[strum(serialize = "sodium")]
    Sodium,
}

impl Engine {
    /// Every engine, in auto-selection preference order.
    pub const ALL: [Self; 2] = [Self::Sodium, Self::OpenSsl];

    /// The two-byte marker written in front of the frame.
    #[must_use]
    pub const fn marker(self) -> &'static [u8; MARKER_LEN] {
        match self {
            Self::OpenSsl => b"o:",
            Self::Sodium => b"s:",
        }
    }

    /// Resolves the engine that produced a frame from its leading marker.
    #[must_use]
    pub fn from_marker(frame: &[u8]) -> Option<Self> {
        let marker = frame.get(..MARKER_LEN)?;
        Self::ALL.into_iter().find(|engine| engine.marker() == marker)
    }

    /// Whether this engine was compiled into the current build.
    #[must_use]
    pub const fn is_available(self) -> bool {
        match self {
            Self::OpenSsl => cfg!(feature = "engine-openssl"),
            Self::Sodium => cfg!(feature = "engine-sodium"),
        }
    }

    /// Human-readable cipher name.
    #[must_use]
    pub const fn cipher_name(self) -> &'static str {
        match self {
            Self::OpenSsl => "AES-256-GCM",
            Self::Sodium => "XChaCha20-Poly1305",
        }
    }

    /// Nonce (IV) length used by this engine.
    #[must_use]
    pub const fn nonce_len(self) -> usize {
        match self {
            Self::OpenSsl => 12,
            Self::Sodium => 24,
        }
    }

    /// Shortest frame this engine can produce: marker, nonce and tag around an empty plaintext.
    #[must_use]
    pub const fn min_frame_len(self) -> usize {
        MARKER_LEN + self.nonce_len() + TAG_LEN
    }
}

/// Engine requested at construction time.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EnginePreference {
    /// Sodium when compiled in, otherwise OpenSSL.
    #[default]
    Auto,
    OpenSsl,
    Sodium,
}

impl From<Engine> for EnginePreference {
    fn from(engine: Engine) -> Self {
        match engine {
            Engine::OpenSsl => Self::OpenSsl,
            Engine::Sodium => Self::Sodium,
        }
    }
}

// --- Modes ---

/// Text encoding applied to the framed ciphertext. Has no influence on the engine.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Mode {
    /// Standard base64 with padding.
    #[default]
    Standard,
    /// URL-safe base64 without padding.
    UrlSafe,
    /// Same alphabet as [`Mode::UrlSafe`]; used for token envelopes.
    Token,
    /// Lowercase hex.
    Compact,
}

/// Snapshot of how a [`crate::SecureCrypto`] instance is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CryptoInfo {
    pub engine: Engine,
    pub mode: Mode,
    pub sodium_available: bool,
    pub openssl_available: bool,
    pub openssl_cipher: &'static str,
    pub sodium_cipher: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn markers_roundtrip() {
        for engine in Engine::ALL {
            let mut frame = engine.marker().to_vec();
            frame.extend_from_slice(b"rest");
            assert_eq!(Engine::from_marker(&frame), Some(engine));
        }
        assert_eq!(Engine::from_marker(b"x:abc"), None);
        assert_eq!(Engine::from_marker(b"o"), None);
    }

    #[test]
    fn names_parse_like_config_values() {
        assert_eq!(EnginePreference::from_str("AUTO").ok(), Some(EnginePreference::Auto));
        assert_eq!(EnginePreference::from_str("openssl").ok(), Some(EnginePreference::OpenSsl));
        assert_eq!(Mode::from_str("url_safe").ok(), Some(Mode::UrlSafe));
        assert_eq!(Mode::Compact.to_string(), "compact");
        assert_eq!(Engine::OpenSsl.as_ref(), "openssl");
        assert!(Mode::from_str("base32").is_err());
    }

    #[test]
    fn minimum_frames() {
        assert_eq!(Engine::OpenSsl.min_frame_len(), 30);
        assert_eq!(Engine::Sodium.min_frame_len(), 42);
    }
}
