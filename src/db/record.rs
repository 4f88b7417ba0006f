//! Storage-side view of a record kind
//!
//! A [`Record`] knows its table, its kind-specific columns and how to map a
//! row back into itself. It does not know which of its columns hold
//! ciphertext.

use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;
use rusqlite::Row;

/// Columns every table carries ahead of the kind-specific ones.
pub const META_COLUMNS: &[&str] = &["id", "created_at", "updated_at", "deleted_at"];

/// Storage bookkeeping shared by every record kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordMeta {
    /// Zero until the first save assigns a row id.
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `Some` once soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl RecordMeta {
    pub fn with_id(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: i64 = row.get(0)?;
        Ok(Self {
            id: id as u64,
            created_at: row.get(1)?,
            updated_at: row.get(2)?,
            deleted_at: row.get(3)?,
        })
    }
}

pub trait Record: Sized + Send {
    /// Table name; doubles as the kind name in errors and logs.
    const TABLE: &'static str;

    /// Kind-specific columns, in the order of [`Record::column_values`].
    const COLUMNS: &'static [&'static str];

    /// Plaintext text columns open to substring search and ordering.
    const SEARCHABLE: &'static [&'static str];

    /// Extra DDL run after the table exists (indexes, constraints).
    const EXTRA_SCHEMA: &'static str = "";

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    fn column_values(&self) -> Vec<&dyn ToSql>;

    /// Build from a row whose kind columns start at index `first`.
    fn from_columns(meta: RecordMeta, row: &Row<'_>, first: usize) -> rusqlite::Result<Self>;

    fn is_orderable(field: &str) -> bool {
        matches!(field, "id" | "created_at" | "updated_at")
            || Self::SEARCHABLE.iter().any(|f| *f == field)
    }
}
