//! Connection setup and schema for the vault database.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;
use tracing::debug;

use super::record::Record;
use crate::error::Result;
use crate::model::{BankAccount, CreditCard, Email, Login, Note};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub fn open_vault_db<P: AsRef<Path>>(path: P) -> Result<Connection> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(path.as_ref())?;
    prepare(&conn)?;
    debug!(path = %path.as_ref().display(), "vault database opened");
    Ok(conn)
}

pub fn open_vault_db_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    prepare(&conn)?;
    Ok(conn)
}

fn prepare(conn: &Connection) -> Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    ensure_table::<Login>(conn)?;
    ensure_table::<CreditCard>(conn)?;
    ensure_table::<BankAccount>(conn)?;
    ensure_table::<Note>(conn)?;
    ensure_table::<Email>(conn)?;
    Ok(())
}

/// `CREATE TABLE IF NOT EXISTS` for one record kind.
pub(crate) fn table_ddl<E: Record>() -> String {
    let columns: String = E::COLUMNS
        .iter()
        .map(|c| format!(",\n            {c} TEXT NOT NULL DEFAULT ''"))
        .collect();
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT{columns}
        );

        CREATE INDEX IF NOT EXISTS idx_{table}_deleted_at ON {table}(deleted_at);
        "#,
        table = E::TABLE,
    )
}

fn ensure_table<E: Record>(conn: &Connection) -> Result<()> {
    conn.execute_batch(&table_ddl::<E>())?;
    if !E::EXTRA_SCHEMA.is_empty() {
        conn.execute_batch(E::EXTRA_SCHEMA)?;
    }
    Ok(())
}
