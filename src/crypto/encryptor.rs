//! Injection seam between the transformation layer and the cipher.
//!
//! Record services hold an `Arc<dyn FieldEncryptor>` and never see key
//! material. [`FieldCipher`] is the production implementation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::cipher::FieldCipher;
use super::error::CryptoResult;

pub trait FieldEncryptor: Send + Sync {
    /// Encrypt one field value, returning raw ciphertext bytes.
    fn encrypt_field(&self, plaintext: &str) -> CryptoResult<Vec<u8>>;

    /// Decrypt raw ciphertext bytes produced by `encrypt_field`.
    fn decrypt_field(&self, ciphertext: &[u8]) -> CryptoResult<String>;

    /// Encrypt and base64-encode for storage.
    fn seal(&self, plaintext: &str) -> CryptoResult<String> {
        Ok(STANDARD.encode(self.encrypt_field(plaintext)?))
    }

    /// Base64-decode a stored value and decrypt it.
    fn open(&self, stored: &str) -> CryptoResult<String> {
        let bytes = STANDARD.decode(stored)?;
        self.decrypt_field(&bytes)
    }
}

impl FieldEncryptor for FieldCipher {
    fn encrypt_field(&self, plaintext: &str) -> CryptoResult<Vec<u8>> {
        self.encrypt(plaintext)
    }

    fn decrypt_field(&self, ciphertext: &[u8]) -> CryptoResult<String> {
        self.decrypt(ciphertext)
    }
}
