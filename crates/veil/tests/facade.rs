use std::io::Write;
use veil::features;
use veil::prelude::*;

#[test]
fn engine_features_match_crypto_availability() {
    assert_eq!(features::is_enabled("openssl"), Engine::OpenSsl.is_available());
    assert_eq!(features::is_enabled("sodium"), Engine::Sodium.is_available());
    assert!(!features::is_enabled("rot13"));
}

#[test]
fn init_builds_from_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "master_key = \"facade-key\"").unwrap();
    writeln!(file, "mode = \"url_safe\"").unwrap();
    writeln!(file, "default_salt = \"facade\"").unwrap();

    let crypto = veil::init(file.path()).expect("init failed");
    assert_eq!(crypto.mode(), Mode::UrlSafe);

    let sealed = crypto.encrypt_for_token("through the facade", 0).unwrap();
    assert_eq!(crypto.decrypt_from_token(&sealed).unwrap(), "through the facade");
}
