use std::path::PathBuf;

use crate::consts::{DEFAULT_DB_FILE, DEFAULT_KDF_SALT};

pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("credential-vault").join(DEFAULT_DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

pub fn default_kdf_salt_hex() -> String {
    hex::encode(DEFAULT_KDF_SALT)
}
