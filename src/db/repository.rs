//! Generic filtered, paginated, soft-deleting CRUD over one record kind.

use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::types::{ToSql, Value};
use rusqlite::{params_from_iter, Connection, OptionalExtension, TransactionBehavior};
use tracing::debug;

use super::record::{Record, RecordMeta, META_COLUMNS};
use crate::error::{Result, VaultError};
use crate::filter::FilterSpec;

/// Per-kind handle onto the shared vault connection.
pub struct Repository<'s, E> {
    conn: &'s Mutex<Connection>,
    _kind: PhantomData<fn() -> E>,
}

impl<'s, E: Record> Repository<'s, E> {
    pub(crate) fn new(conn: &'s Mutex<Connection>) -> Self {
        Self {
            conn,
            _kind: PhantomData,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'s, Connection>> {
        self.conn
            .lock()
            .map_err(|_| VaultError::Internal("connection mutex poisoned".into()))
    }

    fn select_list() -> String {
        META_COLUMNS
            .iter()
            .chain(E::COLUMNS)
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<E> {
        let meta = RecordMeta::from_row(row)?;
        E::from_columns(meta, row, META_COLUMNS.len())
    }

    /// Active records matching `filter`: search, then sort, then paginate.
    pub fn find_all(&self, filter: &FilterSpec) -> Result<Vec<E>> {
        let mut sql = format!(
            "SELECT {} FROM {} WHERE deleted_at IS NULL",
            Self::select_list(),
            E::TABLE
        );
        let mut args: Vec<Value> = Vec::new();

        if !filter.search.is_empty() {
            let fields: Vec<&str> = match filter.search_field.as_deref() {
                Some(field) if E::SEARCHABLE.iter().any(|f| *f == field) => vec![field],
                Some(field) => {
                    return Err(VaultError::InvalidFilterField(format!(
                        "{}: cannot search on `{field}`",
                        E::TABLE
                    )))
                }
                None => E::SEARCHABLE.to_vec(),
            };
            if !fields.is_empty() {
                let clause = fields
                    .iter()
                    .map(|f| format!("{f} LIKE ?1 ESCAPE '\\'"))
                    .collect::<Vec<_>>()
                    .join(" OR ");
                sql.push_str(&format!(" AND ({clause})"));
                args.push(Value::Text(like_pattern(&filter.search)));
            }
        }

        if filter.order.is_empty() {
            sql.push_str(" ORDER BY id ASC");
        } else if E::is_orderable(&filter.order) {
            sql.push_str(&format!(
                " ORDER BY {} {}",
                filter.order,
                filter.direction.as_sql()
            ));
            if filter.order != "id" {
                sql.push_str(", id ASC");
            }
        } else {
            return Err(VaultError::InvalidFilterField(format!(
                "{}: cannot order on `{}`",
                E::TABLE,
                filter.order
            )));
        }

        if let Some((offset, limit)) = filter.pagination() {
            let n = args.len();
            sql.push_str(&format!(" LIMIT ?{} OFFSET ?{}", n + 1, n + 2));
            args.push(Value::Integer(limit));
            args.push(Value::Integer(offset));
        }

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(args.iter()), Self::map_row)?
            .collect::<rusqlite::Result<Vec<E>>>()?;

        debug!(kind = E::TABLE, count = rows.len(), "find_all");
        Ok(rows)
    }

    /// The active record with `id`.
    pub fn find_by_id(&self, id: u64) -> Result<E> {
        let key = sql_id::<E>(id)?;
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?1 AND deleted_at IS NULL",
            Self::select_list(),
            E::TABLE
        );
        let conn = self.lock()?;
        let found = conn.query_row(&sql, [key], Self::map_row).optional()?;
        found.ok_or_else(|| VaultError::not_found(E::TABLE, id))
    }

    /// Insert when the id is zero, otherwise update the active row in place.
    pub fn save(&self, mut entity: E) -> Result<E> {
        if entity.meta().is_new() {
            self.insert(&mut entity)?;
        } else {
            self.update(&mut entity)?;
        }
        Ok(entity)
    }

    fn insert(&self, entity: &mut E) -> Result<()> {
        let now = Utc::now();
        let placeholders = (3..=E::COLUMNS.len() + 2)
            .map(|i| format!(", ?{i}"))
            .collect::<String>();
        let sql = format!(
            "INSERT INTO {} (created_at, updated_at, {}) VALUES (?1, ?2{placeholders})",
            E::TABLE,
            E::COLUMNS.join(", ")
        );

        let conn = self.lock()?;
        {
            let mut values: Vec<&dyn ToSql> = Vec::with_capacity(E::COLUMNS.len() + 2);
            values.push(&now);
            values.push(&now);
            values.extend(entity.column_values());
            conn.execute(&sql, values.as_slice())?;
        }
        let id = conn.last_insert_rowid() as u64;

        *entity.meta_mut() = RecordMeta {
            id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        debug!(kind = E::TABLE, id, "inserted");
        Ok(())
    }

    // Check-then-write runs under one IMMEDIATE transaction so a concurrent
    // delete cannot slip between the existence check and the update.
    fn update(&self, entity: &mut E) -> Result<()> {
        let id = entity.meta().id;
        let key = sql_id::<E>(id)?;
        let now = Utc::now();
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, c)| format!(", {c} = ?{}", i + 2))
            .collect::<String>();
        let sql = format!(
            "UPDATE {} SET updated_at = ?1{assignments} WHERE id = ?{} AND deleted_at IS NULL",
            E::TABLE,
            E::COLUMNS.len() + 2
        );

        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let created_at = tx
            .query_row(
                &format!(
                    "SELECT created_at FROM {} WHERE id = ?1 AND deleted_at IS NULL",
                    E::TABLE
                ),
                [key],
                |row| row.get::<_, DateTime<Utc>>(0),
            )
            .optional()?
            .ok_or_else(|| VaultError::not_found(E::TABLE, id))?;

        {
            let mut values: Vec<&dyn ToSql> = Vec::with_capacity(E::COLUMNS.len() + 2);
            values.push(&now);
            values.extend(entity.column_values());
            values.push(&key);
            tx.execute(&sql, values.as_slice())?;
        }
        tx.commit()?;

        *entity.meta_mut() = RecordMeta {
            id,
            created_at,
            updated_at: now,
            deleted_at: None,
        };
        debug!(kind = E::TABLE, id, "updated");
        Ok(())
    }

    /// Soft-delete: stamps `deleted_at`, never removes the row.
    pub fn delete(&self, id: u64) -> Result<()> {
        let key = sql_id::<E>(id)?;
        let sql = format!(
            "UPDATE {} SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
            E::TABLE
        );
        let conn = self.lock()?;
        let changed = conn.execute(&sql, rusqlite::params![Utc::now(), key])?;
        if changed == 0 {
            return Err(VaultError::not_found(E::TABLE, id));
        }
        debug!(kind = E::TABLE, id, "soft-deleted");
        Ok(())
    }

    /// Number of active records.
    pub fn count(&self) -> Result<u64> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE deleted_at IS NULL", E::TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(n as u64)
    }
}

// Ids beyond i64 cannot exist in SQLite
fn sql_id<E: Record>(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| VaultError::not_found(E::TABLE, id))
}

fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
