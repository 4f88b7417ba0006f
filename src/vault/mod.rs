//! Vault: store + encryptor + policy, handing out per-kind services.

mod transform;

pub use transform::RecordService;

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::crypto::FieldEncryptor;
use crate::db::Store;
use crate::enums::DecryptFailurePolicy;
use crate::error::{Result, VaultError};
use crate::model::{BankAccount, CreditCard, Email, Login, Note, RecordKind};

pub struct Vault {
    store: Store,
    encryptor: Arc<dyn FieldEncryptor>,
    policy: DecryptFailurePolicy,
}

impl Vault {
    pub fn new(
        store: Store,
        encryptor: Arc<dyn FieldEncryptor>,
        policy: DecryptFailurePolicy,
    ) -> Self {
        Self {
            store,
            encryptor,
            policy,
        }
    }

    /// Open the configured database and derive the field key once.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cipher = config.field_cipher()?;
        let store = Store::open(&config.database.path)?;
        info!(
            path = %config.database.path.display(),
            policy = ?config.vault.decrypt_failure,
            "vault opened"
        );
        Ok(Self::new(
            store,
            Arc::new(cipher),
            config.vault.decrypt_failure,
        ))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn policy(&self) -> DecryptFailurePolicy {
        self.policy
    }

    pub fn records<E: RecordKind>(&self) -> Result<RecordService<'_, E>> {
        RecordService::new(
            self.store.repository(),
            Arc::clone(&self.encryptor),
            self.policy,
        )
    }

    pub fn logins(&self) -> Result<RecordService<'_, Login>> {
        self.records()
    }

    pub fn credit_cards(&self) -> Result<RecordService<'_, CreditCard>> {
        self.records()
    }

    pub fn bank_accounts(&self) -> Result<RecordService<'_, BankAccount>> {
        self.records()
    }

    pub fn notes(&self) -> Result<RecordService<'_, Note>> {
        self.records()
    }

    pub fn emails(&self) -> Result<RecordService<'_, Email>> {
        self.records()
    }
}

/// Parse a raw identifier from the request layer.
pub fn parse_id(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(VaultError::Validation("id must be positive".into())),
        Ok(id) => Ok(id),
        Err(_) => Err(VaultError::Validation(format!("`{raw}` is not a valid id"))),
    }
}
