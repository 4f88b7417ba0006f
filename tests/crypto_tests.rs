mod support;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use credential_vault::consts::{NONCE_SIZE, TAG_SIZE};
use credential_vault::crypto::{self, derive_key, CryptoError, FieldEncryptor};
use credential_vault::{FieldCipher, KdfParams, Salt};
use support::fast_cipher;

#[test]
fn test_encrypt_decrypt_roundtrip_in_memory() {
    let cipher = fast_cipher("k");
    let ciphertext = cipher.encrypt("Attack at dawn!").unwrap();
    assert_eq!(ciphertext.len(), NONCE_SIZE + "Attack at dawn!".len() + TAG_SIZE);
    assert_eq!(cipher.decrypt(&ciphertext).unwrap(), "Attack at dawn!");
}

#[test]
fn test_empty_plaintext_roundtrip() {
    let cipher = fast_cipher("k");
    let ciphertext = cipher.encrypt("").unwrap();
    assert!(!ciphertext.is_empty());
    assert_eq!(cipher.decrypt(&ciphertext).unwrap(), "");
}

#[test]
fn test_random_nonce_per_call() {
    let cipher = fast_cipher("k");
    let a = cipher.encrypt("same").unwrap();
    let b = cipher.encrypt("same").unwrap();
    assert_ne!(a, b);
    assert_eq!(cipher.decrypt(&a).unwrap(), cipher.decrypt(&b).unwrap());
}

#[test]
fn test_decrypt_fails_with_wrong_passphrase() {
    let ciphertext = fast_cipher("right").encrypt("secret").unwrap();
    let wrong = fast_cipher("wrong").decrypt(&ciphertext);
    assert!(matches!(wrong, Err(CryptoError::Decryption(_))));
}

#[test]
fn test_tampered_ciphertext_is_rejected() {
    let cipher = fast_cipher("k");
    let mut ciphertext = cipher.encrypt("secret").unwrap();
    let last = ciphertext.len() - 1;
    ciphertext[last] ^= 0x01;
    assert!(cipher.decrypt(&ciphertext).is_err());
}

#[test]
fn test_short_ciphertext_is_rejected() {
    let cipher = fast_cipher("k");
    assert!(matches!(
        cipher.decrypt(&[0u8; NONCE_SIZE + TAG_SIZE - 1]),
        Err(CryptoError::Decryption(_))
    ));
}

#[test]
fn test_empty_passphrase_is_invalid_key() {
    let err = FieldCipher::derive("", &Salt::default(), &KdfParams::fast()).unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKey(_)));
}

#[test]
fn test_key_derivation_is_deterministic() {
    let a = derive_key("pass", &Salt::default(), &KdfParams::fast()).unwrap();
    let b = derive_key("pass", &Salt::default(), &KdfParams::fast()).unwrap();
    assert_eq!(a.expose_secret(), b.expose_secret());

    let other_salt = Salt::from_bytes([7u8; 16]);
    let c = derive_key("pass", &other_salt, &KdfParams::fast()).unwrap();
    assert_ne!(a.expose_secret(), c.expose_secret());
}

#[test]
fn test_ciphertext_survives_rederivation() {
    // a restarted process derives the same key and can read old rows
    let stored = fast_cipher("restart").seal("persisted").unwrap();
    assert_eq!(fast_cipher("restart").open(&stored).unwrap(), "persisted");
}

#[test]
fn test_seal_is_base64_of_raw_ciphertext() {
    let cipher = fast_cipher("k");
    let sealed = cipher.seal("1234-5678").unwrap();
    let raw = STANDARD.decode(&sealed).unwrap();
    assert_eq!(cipher.decrypt_field(&raw).unwrap(), "1234-5678");
    assert!(matches!(cipher.open("%%%"), Err(CryptoError::Encoding(_))));
}

#[test]
fn test_salt_from_hex_validates_length() {
    assert!(Salt::from_hex("00112233445566778899aabbccddeeff").is_ok());
    assert!(matches!(
        Salt::from_hex("0011"),
        Err(CryptoError::InvalidKey(_))
    ));
}

#[test]
fn test_stateless_free_functions_roundtrip() {
    let ciphertext = crypto::encrypt("DummyPassword", "server-passphrase").unwrap();
    assert_eq!(
        crypto::decrypt(&ciphertext, "server-passphrase").unwrap(),
        "DummyPassword"
    );
    assert!(crypto::encrypt("x", "").is_err());
}

#[test]
fn test_debug_never_shows_key() {
    let rendered = format!("{:?}", fast_cipher("k"));
    assert!(rendered.contains("REDACTED"));
}
