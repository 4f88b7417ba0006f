//! Test utilities — temp-dir backed vault with a fast KDF

use std::path::{Path, PathBuf};
use std::sync::Arc;

use credential_vault::{DecryptFailurePolicy, FieldCipher, KdfParams, Salt, Store, Vault};
use rusqlite::{params, Connection};
use tempfile::TempDir;

#[allow(dead_code)]
pub const PASSPHRASE: &str = "test-vault-passphrase-2025";

#[allow(dead_code)]
pub struct TestVault {
    pub vault: Vault,
    dir: TempDir,
    db_path: PathBuf,
}

#[allow(dead_code)]
impl TestVault {
    pub fn new() -> Self {
        Self::with_policy(DecryptFailurePolicy::Abort)
    }

    pub fn with_policy(policy: DecryptFailurePolicy) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db_path = dir.path().join("vault.db");
        let vault = open_vault(&db_path, PASSPHRASE, policy);
        Self {
            vault,
            dir,
            db_path,
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// A second, independent connection for inspecting what hit the disk.
    pub fn raw(&self) -> Connection {
        Connection::open(&self.db_path).expect("open raw connection")
    }

    pub fn raw_field(&self, table: &str, column: &str, id: u64) -> String {
        self.raw()
            .query_row(
                &format!("SELECT {column} FROM {table} WHERE id = ?1"),
                params![id as i64],
                |row| row.get(0),
            )
            .expect("raw field")
    }

    pub fn overwrite_field(&self, table: &str, column: &str, id: u64, value: &str) {
        self.raw()
            .execute(
                &format!("UPDATE {table} SET {column} = ?1 WHERE id = ?2"),
                params![value, id as i64],
            )
            .expect("overwrite field");
    }
}

impl Default for TestVault {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
pub fn fast_cipher(passphrase: &str) -> FieldCipher {
    FieldCipher::derive(passphrase, &Salt::default(), &KdfParams::fast()).expect("derive key")
}

#[allow(dead_code)]
pub fn open_vault(path: &Path, passphrase: &str, policy: DecryptFailurePolicy) -> Vault {
    let store = Store::open(path).expect("open store");
    Vault::new(store, Arc::new(fast_cipher(passphrase)), policy)
}
