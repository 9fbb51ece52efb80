pub mod fixtures;

use fixtures::*;
use veil_crypto::prelude::*;
use veil_crypto::{CryptoConfig, MARKER_LEN, codec, generate_secure_random, secure_compare};

#[test]
fn hello_secure_crypto_url_safe_scenario() {
    let crypto = SecureCrypto::new(MASTER_KEY, EnginePreference::Auto, Mode::UrlSafe)
        .expect("construction failed");

    let sealed = crypto.encrypt("Hello, SecureCrypto!").expect("encrypt failed");

    assert!(!sealed.contains(['+', '/', '=']), "url-safe output leaked reserved chars: {sealed}");
    assert_eq!(crypto.decrypt(&sealed).expect("decrypt failed"), "Hello, SecureCrypto!");
}

#[test]
fn roundtrip_every_engine_and_mode() {
    let inputs = ["", "ascii", "Grüße, 世界 🌍", "line\nbreaks\tand\0nul"];

    for engine in engines() {
        for mode in ALL_MODES {
            let crypto = setup_crypto(engine, mode);
            for input in inputs {
                let sealed = crypto.encrypt(input).expect("encrypt failed");
                let opened = crypto.decrypt(&sealed).expect("decrypt failed");
                assert_eq!(opened, input, "{engine}/{mode}");
            }
        }
    }
}

#[test]
fn multi_megabyte_roundtrip() {
    let payload = "veil".repeat(1024 * 1024);

    for engine in engines() {
        let crypto = setup_crypto(engine, Mode::Standard);
        let sealed = crypto.encrypt(&payload).expect("encrypt failed");
        assert_eq!(crypto.decrypt(&sealed).expect("decrypt failed"), payload);
    }
}

#[test]
fn compact_mode_is_lowercase_hex() {
    let crypto = setup_crypto(default_engine(), Mode::Compact);
    let sealed = crypto.encrypt("hex me").unwrap();
    assert!(sealed.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
}

#[test]
fn nonce_freshness() {
    for engine in engines() {
        let crypto = setup_crypto(engine, Mode::Standard);
        let a = crypto.encrypt("same").unwrap();
        let b = crypto.encrypt("same").unwrap();

        assert_ne!(a, b);
        assert_eq!(crypto.decrypt(&a).unwrap(), "same");
        assert_eq!(crypto.decrypt(&b).unwrap(), "same");
    }
}

#[test]
fn frames_carry_the_configured_marker() {
    for engine in engines() {
        let crypto = setup_crypto(engine, Mode::Compact);
        let bytes = codec::decode(Mode::Compact, crypto.encrypt("m").unwrap()).unwrap();
        assert_eq!(&bytes[..MARKER_LEN], engine.marker());
        assert_eq!(bytes.len(), engine.min_frame_len() + 1);
    }
}

#[test]
fn url_helpers_ignore_instance_mode() {
    let crypto = setup_crypto(default_engine(), Mode::Compact);
    let sealed = crypto.encrypt_for_url("a/b?c=d&e=f").unwrap();

    assert!(!sealed.contains(['+', '/', '=']));
    assert_eq!(crypto.decrypt_from_url(&sealed).unwrap(), "a/b?c=d&e=f");
}

#[test]
fn per_call_salt() {
    let crypto = setup_crypto(default_engine(), Mode::UrlSafe);
    let sealed = crypto.encrypt_salted("salted", "tenant-7").unwrap();

    assert_eq!(crypto.decrypt_salted(&sealed, "tenant-7").unwrap(), "salted");
    assert!(matches!(
        crypto.decrypt_salted(&sealed, "tenant-8"),
        Err(CryptoError::DecryptionFailed { .. })
    ));
    assert!(matches!(crypto.decrypt(&sealed), Err(CryptoError::DecryptionFailed { .. })));
}

#[test]
fn raw_bytes_api() {
    let crypto = setup_crypto(default_engine(), Mode::Standard);
    let data: Vec<u8> = (0..=255).collect();

    let sealed = crypto.encrypt_bytes(&data, Some(b"bin".as_slice())).unwrap();
    assert_eq!(crypto.decrypt_bytes(&sealed, Some(b"bin".as_slice())).unwrap(), data);
}

#[test]
fn info_reports_configuration() {
    let crypto = setup_crypto(default_engine(), Mode::Token);
    let info = crypto.info();

    assert_eq!(info.engine, crypto.engine());
    assert_eq!(info.mode, Mode::Token);
    assert_eq!(info.openssl_cipher, "AES-256-GCM");
    assert_eq!(info.sodium_cipher, "XChaCha20-Poly1305");
    assert_eq!(info.sodium_available, Engine::Sodium.is_available());

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["mode"], "token");
}

#[test]
fn from_config_matches_builder() {
    let mut config = CryptoConfig::new(MASTER_KEY);
    config.mode = Mode::UrlSafe;
    config.default_salt = Some(SALT.to_owned());

    let from_config = SecureCrypto::from_config(&config).unwrap();
    let built = setup_crypto(from_config.engine(), Mode::UrlSafe);

    let sealed = built.encrypt("shared").unwrap();
    assert_eq!(from_config.decrypt(&sealed).unwrap(), "shared");
}

#[test]
fn from_config_rejects_empty_key() {
    let config = CryptoConfig::new("");
    assert!(matches!(
        SecureCrypto::from_config(&config),
        Err(CryptoError::InvalidConfiguration { .. })
    ));
}

#[test]
fn kdf_info_separates_instances() {
    let base = setup_crypto(default_engine(), Mode::Standard);
    let other = SecureCrypto::builder()
        .master_key(MASTER_KEY)
        .default_salt(SALT)
        .kdf_info("another-app")
        .build()
        .unwrap();

    let sealed = base.encrypt("isolated").unwrap();
    assert!(matches!(other.decrypt(&sealed), Err(CryptoError::DecryptionFailed { .. })));
}

#[test]
fn helpers() {
    let id = generate_secure_random(16, true).unwrap();
    assert_eq!(id.len(), 22);
    assert!(secure_compare(&id, id.clone()));
    assert!(!secure_compare(&id, "x"));
}
