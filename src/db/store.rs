//! The shared vault store and its per-kind repositories.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use super::record::Record;
use super::repository::Repository;
use super::vault_db_conn::{open_vault_db, open_vault_db_in_memory};
use crate::error::Result;
use crate::model::{BankAccount, CreditCard, Email, Login, Note};

/// Owns the single vault connection. Safe to share across threads; every
/// repository call takes the connection lock for its duration.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_connection(open_vault_db(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(open_vault_db_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn repository<E: Record>(&self) -> Repository<'_, E> {
        Repository::new(&self.conn)
    }

    pub fn logins(&self) -> Repository<'_, Login> {
        self.repository()
    }

    pub fn credit_cards(&self) -> Repository<'_, CreditCard> {
        self.repository()
    }

    pub fn bank_accounts(&self) -> Repository<'_, BankAccount> {
        self.repository()
    }

    pub fn notes(&self) -> Repository<'_, Note> {
        self.repository()
    }

    pub fn emails(&self) -> Repository<'_, Email> {
        self.repository()
    }
}
