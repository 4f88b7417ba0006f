//! Error types for the encryption layer.

use thiserror::Error;

pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors raised by key derivation, encryption and decryption.
///
/// Messages never carry key material or plaintext.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed")]
    Encryption,

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("invalid base64 ciphertext")]
    Encoding(#[from] base64::DecodeError),
}
