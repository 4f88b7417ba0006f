// src/consts.rs
//! Shared constants — security parameters and defaults

/// Size of the derived field key in bytes (256 bits for ChaCha20)
pub const KEY_SIZE: usize = 32;

/// Size of the random nonce prefixed to every ciphertext (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Poly1305 authentication tag size
pub const TAG_SIZE: usize = 16;

/// Argon2id salt length
pub const SALT_SIZE: usize = 16;

/// Salt used when the config does not provide one.
// Changing this invalidates every stored ciphertext of existing installs
pub const DEFAULT_KDF_SALT: [u8; SALT_SIZE] = *b"credential-vault";

/// Default config file, overridable with `CV_CONFIG`
pub const DEFAULT_CONFIG_FILE: &str = "credential-vault.toml";

/// Default database file name inside the platform data dir
pub const DEFAULT_DB_FILE: &str = "credential-vault.db";

/// Sentinel for an unset integer filter option
pub const UNSET: i64 = -1;

/// Export envelope format tag
pub const EXPORT_FORMAT: &str = "credential-vault-v1";
