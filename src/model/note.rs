use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{RecordKind, SensitiveFields};
use crate::db::{Record, RecordMeta};

/// Free-form secure note; only the title is searchable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub meta: RecordMeta,
    pub title: String,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDto {
    #[serde(default)]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub note: String,
}

impl Record for Note {
    const TABLE: &'static str = "notes";
    const COLUMNS: &'static [&'static str] = &["title", "note"];
    const SEARCHABLE: &'static [&'static str] = &["title"];

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn column_values(&self) -> Vec<&dyn ToSql> {
        vec![&self.title as &dyn ToSql, &self.note]
    }

    fn from_columns(meta: RecordMeta, row: &Row<'_>, first: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            meta,
            title: row.get(first)?,
            note: row.get(first + 1)?,
        })
    }
}

impl SensitiveFields for Note {
    const SENSITIVE_FIELDS: &'static [&'static str] = &["note"];

    fn sensitive_field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "note" => Some(&mut self.note),
            _ => None,
        }
    }
}

impl RecordKind for Note {
    type Dto = NoteDto;
}

impl From<NoteDto> for Note {
    fn from(dto: NoteDto) -> Self {
        Self {
            meta: RecordMeta::with_id(dto.id),
            title: dto.title,
            note: dto.note,
        }
    }
}

impl From<Note> for NoteDto {
    fn from(note: Note) -> Self {
        Self {
            id: note.meta.id,
            created_at: Some(note.meta.created_at),
            updated_at: Some(note.meta.updated_at),
            title: note.title,
            note: note.note,
        }
    }
}
