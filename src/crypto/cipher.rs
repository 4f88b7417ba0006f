//! Field encryption using ChaCha20-Poly1305.
//!
//! Ciphertext layout: `nonce (12) || ciphertext || tag (16)`. A fresh random
//! nonce is drawn for every call, so encrypting the same value twice yields
//! different bytes.

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use rand::RngCore;

use crate::aliases::FieldKey32;
use crate::consts::{NONCE_SIZE, TAG_SIZE};

use super::error::{CryptoError, CryptoResult};
use super::key::{derive_key, KdfParams, Salt};

/// A passphrase-derived key ready for field encryption.
///
/// Derivation happens once in [`FieldCipher::derive`]; every later call only
/// runs the AEAD.
pub struct FieldCipher {
    key: FieldKey32,
}

impl FieldCipher {
    pub fn derive(passphrase: &str, salt: &Salt, params: &KdfParams) -> CryptoResult<Self> {
        Ok(Self {
            key: derive_key(passphrase, salt, params)?,
        })
    }

    pub fn from_key(key: FieldKey32) -> Self {
        Self { key }
    }

    pub fn encrypt(&self, plaintext: &str) -> CryptoResult<Vec<u8>> {
        let cipher = ChaCha20Poly1305::new(self.key.expose_secret().into());

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let sealed = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::Encryption)?;

        let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<String> {
        if ciphertext.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::Decryption("ciphertext too short".into()));
        }
        let (nonce_bytes, sealed) = ciphertext.split_at(NONCE_SIZE);
        let cipher = ChaCha20Poly1305::new(self.key.expose_secret().into());

        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), sealed)
            .map_err(|_| {
                CryptoError::Decryption("authentication failed (wrong key or tampered data)".into())
            })?;

        String::from_utf8(plaintext)
            .map_err(|_| CryptoError::Decryption("plaintext is not valid UTF-8".into()))
    }
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Encrypt `plaintext` under a key derived from `passphrase`.
///
/// Stateless form: derives with default salt and parameters on every call.
/// Prefer holding a [`FieldCipher`] when encrypting more than one value.
pub fn encrypt(plaintext: &str, passphrase: &str) -> CryptoResult<Vec<u8>> {
    FieldCipher::derive(passphrase, &Salt::default(), &KdfParams::default())?.encrypt(plaintext)
}

/// Inverse of [`encrypt`].
pub fn decrypt(ciphertext: &[u8], passphrase: &str) -> CryptoResult<String> {
    FieldCipher::derive(passphrase, &Salt::default(), &KdfParams::default())?.decrypt(ciphertext)
}
