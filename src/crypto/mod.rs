//! Pure cryptographic primitives — no I/O, no database
//!
//! Key derivation, field encryption and the [`FieldEncryptor`] seam used by
//! the record services.

mod cipher;
mod encryptor;
mod error;
mod key;

pub use cipher::{decrypt, encrypt, FieldCipher};
pub use encryptor::FieldEncryptor;
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, KdfParams, Salt};
