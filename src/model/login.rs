use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{RecordKind, SensitiveFields};
use crate::db::{Record, RecordMeta};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    pub meta: RecordMeta,
    pub title: String,
    pub url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginDto {
    #[serde(default)]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Record for Login {
    const TABLE: &'static str = "logins";
    const COLUMNS: &'static [&'static str] = &["title", "url", "username", "password"];
    const SEARCHABLE: &'static [&'static str] = &["title", "url", "username"];

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn column_values(&self) -> Vec<&dyn ToSql> {
        vec![&self.title as &dyn ToSql, &self.url, &self.username, &self.password]
    }

    fn from_columns(meta: RecordMeta, row: &Row<'_>, first: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            meta,
            title: row.get(first)?,
            url: row.get(first + 1)?,
            username: row.get(first + 2)?,
            password: row.get(first + 3)?,
        })
    }
}

impl SensitiveFields for Login {
    const SENSITIVE_FIELDS: &'static [&'static str] = &["password"];

    fn sensitive_field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "password" => Some(&mut self.password),
            _ => None,
        }
    }
}

impl RecordKind for Login {
    type Dto = LoginDto;
}

impl From<LoginDto> for Login {
    fn from(dto: LoginDto) -> Self {
        Self {
            meta: RecordMeta::with_id(dto.id),
            title: dto.title,
            url: dto.url,
            username: dto.username,
            password: dto.password,
        }
    }
}

impl From<Login> for LoginDto {
    fn from(login: Login) -> Self {
        Self {
            id: login.meta.id,
            created_at: Some(login.meta.created_at),
            updated_at: Some(login.meta.updated_at),
            title: login.title,
            url: login.url,
            username: login.username,
            password: login.password,
        }
    }
}
