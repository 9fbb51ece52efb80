#![allow(dead_code)]

use veil_crypto::prelude::*;

pub const MASTER_KEY: &str = "test_encryption_key_2024";
pub const SALT: &str = "fixture-salt";

pub const ALL_MODES: [Mode; 4] = [Mode::Standard, Mode::UrlSafe, Mode::Token, Mode::Compact];

/// Engines compiled into this build.
pub fn engines() -> impl Iterator<Item = Engine> {
    Engine::ALL.into_iter().filter(|e| e.is_available())
}

/// Initializes a [`SecureCrypto`] with the fixture key and salt.
/// # Panics
/// * If the engine is not compiled in.
#[must_use]
pub fn setup_crypto(engine: Engine, mode: Mode) -> SecureCrypto {
    SecureCrypto::builder()
        .master_key(MASTER_KEY)
        .default_salt(SALT)
        .engine(engine)
        .mode(mode)
        .build()
        .expect("SecureCrypto setup failed")
}

/// Decodes `text` for `mode`, flips one bit at `index`, and re-encodes.
#[must_use]
pub fn flip_byte(mode: Mode, text: &str, index: usize) -> String {
    let mut bytes = veil_crypto::codec::decode(mode, text).expect("fixture text must decode");
    bytes[index] ^= 0x01;
    veil_crypto::codec::encode(mode, bytes)
}

/// The engine `EnginePreference::Auto` resolves to.
/// # Panics
/// * If no engine is compiled in.
#[must_use]
pub fn default_engine() -> Engine {
    engines().next().expect("at least one engine must be compiled in")
}
