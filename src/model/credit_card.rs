use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{RecordKind, SensitiveFields};
use crate::db::{Record, RecordMeta};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditCard {
    pub meta: RecordMeta,
    pub card_name: String,
    pub cardholder_name: String,
    pub card_type: String,
    pub number: String,
    pub expiry_date: String,
    pub verification_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardDto {
    #[serde(default)]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub card_name: String,
    #[serde(default)]
    pub cardholder_name: String,
    #[serde(default, rename = "type")]
    pub card_type: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub verification_number: String,
}

impl Record for CreditCard {
    const TABLE: &'static str = "credit_cards";
    const COLUMNS: &'static [&'static str] = &[
        "card_name",
        "cardholder_name",
        "card_type",
        "number",
        "expiry_date",
        "verification_number",
    ];
    const SEARCHABLE: &'static [&'static str] =
        &["card_name", "cardholder_name", "card_type", "expiry_date"];

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn column_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.card_name as &dyn ToSql,
            &self.cardholder_name,
            &self.card_type,
            &self.number,
            &self.expiry_date,
            &self.verification_number,
        ]
    }

    fn from_columns(meta: RecordMeta, row: &Row<'_>, first: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            meta,
            card_name: row.get(first)?,
            cardholder_name: row.get(first + 1)?,
            card_type: row.get(first + 2)?,
            number: row.get(first + 3)?,
            expiry_date: row.get(first + 4)?,
            verification_number: row.get(first + 5)?,
        })
    }
}

impl SensitiveFields for CreditCard {
    const SENSITIVE_FIELDS: &'static [&'static str] = &["number", "verification_number"];

    fn sensitive_field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "number" => Some(&mut self.number),
            "verification_number" => Some(&mut self.verification_number),
            _ => None,
        }
    }
}

impl RecordKind for CreditCard {
    type Dto = CreditCardDto;
}

impl From<CreditCardDto> for CreditCard {
    fn from(dto: CreditCardDto) -> Self {
        Self {
            meta: RecordMeta::with_id(dto.id),
            card_name: dto.card_name,
            cardholder_name: dto.cardholder_name,
            card_type: dto.card_type,
            number: dto.number,
            expiry_date: dto.expiry_date,
            verification_number: dto.verification_number,
        }
    }
}

impl From<CreditCard> for CreditCardDto {
    fn from(card: CreditCard) -> Self {
        Self {
            id: card.meta.id,
            created_at: Some(card.meta.created_at),
            updated_at: Some(card.meta.updated_at),
            card_name: card.card_name,
            cardholder_name: card.cardholder_name,
            card_type: card.card_type,
            number: card.number,
            expiry_date: card.expiry_date,
            verification_number: card.verification_number,
        }
    }
}
