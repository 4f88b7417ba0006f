//! tests/config_tests.rs
//! Opening a vault straight from configuration

mod common;

use credential_vault::aliases::Passphrase;
use credential_vault::config::from_toml_str;
use credential_vault::{Config, DecryptFailurePolicy, ErrorKind, LoginDto, Vault};
use pretty_assertions::assert_eq;

fn fast_config(dir: &std::path::Path, passphrase: &str) -> Config {
    let mut config = Config::default();
    config.crypto.skip_kdf_slowdown = true;
    config.database.path = dir.join("nested").join("vault.db");
    config.apply_overrides(|key| match key {
        "CV_PASSPHRASE" => Some(passphrase.to_string()),
        _ => None,
    });
    config
}

#[test]
fn from_config_round_trips_a_login() {
    common::setup();
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(dir.path(), "config-passphrase");

    let created = {
        let vault = Vault::from_config(&config).unwrap();
        assert_eq!(vault.policy(), DecryptFailurePolicy::Abort);
        vault
            .logins()
            .unwrap()
            .create(LoginDto {
                url: "https://dummywebsite.com".into(),
                username: "DummyUser".into(),
                password: "DummyPassword".into(),
                ..LoginDto::default()
            })
            .unwrap()
    };
    assert!(config.database.path.exists());

    // a fresh open derives the same key from the same salt and passphrase
    let reopened = Vault::from_config(&config).unwrap();
    let found = reopened.logins().unwrap().find_by_id(created.id).unwrap();
    assert_eq!(found, created);
}

#[test]
fn from_config_with_other_passphrase_cannot_read() {
    let dir = tempfile::tempdir().unwrap();
    let created = Vault::from_config(&fast_config(dir.path(), "first"))
        .unwrap()
        .logins()
        .unwrap()
        .create(LoginDto {
            password: "DummyPassword".into(),
            ..LoginDto::default()
        })
        .unwrap();

    let other = Vault::from_config(&fast_config(dir.path(), "second")).unwrap();
    let err = other.logins().unwrap().find_by_id(created.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Crypto);
}

#[test]
fn from_config_honours_policy_and_salt() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = from_toml_str(
        r#"
        [server]
        passphrase = "salted"

        [crypto]
        kdf_salt_hex = "00112233445566778899aabbccddeeff"
        skip_kdf_slowdown = true

        [vault]
        decrypt_failure = "skip"
        "#,
    )
    .unwrap();
    config.database.path = dir.path().join("vault.db");

    let vault = Vault::from_config(&config).unwrap();
    assert_eq!(vault.policy(), DecryptFailurePolicy::Skip);
    let secret: &Passphrase = config.passphrase();
    assert_eq!(secret.expose_secret(), "salted");
}

#[test]
fn from_config_without_passphrase_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.crypto.skip_kdf_slowdown = true;
    config.database.path = dir.path().join("vault.db");

    let err = Vault::from_config(&config).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Crypto);
    assert!(!config.database.path.exists());
}
