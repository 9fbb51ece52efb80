//! # Codec
//!
//! Reversible byte ⇄ text transforms selected by [`Mode`].
//!
//! | Mode                            | Alphabet      | Padding                    |
//! |---------------------------------|---------------|----------------------------|
//! | [`Mode::Standard`]              | `A-Za-z0-9+/` | kept                       |
//! | [`Mode::UrlSafe`], [`Mode::Token`] | `A-Za-z0-9-_` | stripped, tolerated on decode |
//! | [`Mode::Compact`]               | lowercase hex | n/a                        |
//!
//! Decoding is strict: invalid symbols, impossible lengths, misplaced padding and
//! non-canonical trailing bits are all rejected with [`CryptoError::Encoding`].

use crate::error::CryptoError;
use crate::types::Mode;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

/// URL-safe engine that writes no padding and accepts input with or without it.
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes `bytes` as text for `mode`.
#[must_use]
pub fn encode(mode: Mode, bytes: impl AsRef<[u8]>) -> String {
    let bytes = bytes.as_ref();
    match mode {
        Mode::Standard => STANDARD.encode(bytes),
        Mode::UrlSafe | Mode::Token => URL_SAFE.encode(bytes),
        Mode::Compact => hex::encode(bytes),
    }
}

/// Decodes text produced by [`encode`] with the same `mode`.
///
/// # Errors
/// Returns [`CryptoError::Encoding`] for any malformed input.
pub fn decode(mode: Mode, text: impl AsRef<str>) -> Result<Vec<u8>, CryptoError> {
    let text = text.as_ref();
    let decoded = match mode {
        Mode::Standard => STANDARD.decode(text).map_err(|e| e.to_string()),
        Mode::UrlSafe | Mode::Token => URL_SAFE.decode(text).map_err(|e| e.to_string()),
        Mode::Compact => hex::decode(text).map_err(|e| e.to_string()),
    };

    decoded.map_err(|message| CryptoError::Encoding {
        message: message.into(),
        context: Some(format!("Decoding {mode} text").into()),
    })
}
