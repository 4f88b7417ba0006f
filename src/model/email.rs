use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{RecordKind, SensitiveFields};
use crate::db::{Record, RecordMeta};

/// Mailbox credentials. The address is unique among active records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub meta: RecordMeta,
    pub title: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDto {
    #[serde(default)]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Record for Email {
    const TABLE: &'static str = "emails";
    const COLUMNS: &'static [&'static str] = &["title", "email", "password"];
    const SEARCHABLE: &'static [&'static str] = &["title", "email"];
    const EXTRA_SCHEMA: &'static str = "CREATE UNIQUE INDEX IF NOT EXISTS \
        idx_emails_active_email ON emails(email) WHERE deleted_at IS NULL;";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn column_values(&self) -> Vec<&dyn ToSql> {
        vec![&self.title as &dyn ToSql, &self.email, &self.password]
    }

    fn from_columns(meta: RecordMeta, row: &Row<'_>, first: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            meta,
            title: row.get(first)?,
            email: row.get(first + 1)?,
            password: row.get(first + 2)?,
        })
    }
}

impl SensitiveFields for Email {
    const SENSITIVE_FIELDS: &'static [&'static str] = &["password"];

    fn sensitive_field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "password" => Some(&mut self.password),
            _ => None,
        }
    }
}

impl RecordKind for Email {
    type Dto = EmailDto;
}

impl From<EmailDto> for Email {
    fn from(dto: EmailDto) -> Self {
        Self {
            meta: RecordMeta::with_id(dto.id),
            title: dto.title,
            email: dto.email,
            password: dto.password,
        }
    }
}

impl From<Email> for EmailDto {
    fn from(email: Email) -> Self {
        Self {
            id: email.meta.id,
            created_at: Some(email.meta.created_at),
            updated_at: Some(email.meta.updated_at),
            title: email.title,
            email: email.email,
            password: email.password,
        }
    }
}
