// src/lib.rs
//! credential-vault — encrypted-field persistence for a self-hosted
//! credential store
//!
//! Features:
//! - ChaCha20-Poly1305 per-field encryption, Argon2id passphrase key
//! - Generic soft-deleting SQLite repository with search/sort/pagination
//! - Per-kind DTO ↔ entity transformation that never stores plaintext secrets
//! - Plaintext JSON export

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod db;
pub mod enums;
pub mod error;
pub mod export;
pub mod filter;
#[cfg(feature = "logging")]
pub mod logging;
pub mod model;
pub mod vault;

// Re-export everything users need at the crate root
pub use config::{load as load_config, Config};
pub use crypto::{CryptoError, FieldCipher, FieldEncryptor, KdfParams, Salt};
pub use db::{Record, RecordMeta, Repository, Store};
pub use enums::DecryptFailurePolicy;
pub use error::{ErrorKind, Result, VaultError};
pub use export::export_to_json;
pub use filter::{FilterResolver, FilterSpec, SortDirection};
pub use model::{
    BankAccount, BankAccountDto, CreditCard, CreditCardDto, Email, EmailDto, Login, LoginDto,
    Note, NoteDto, RecordKind, SensitiveFields,
};
pub use vault::{parse_id, RecordService, Vault};
