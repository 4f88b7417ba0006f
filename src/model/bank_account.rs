use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{RecordKind, SensitiveFields};
use crate::db::{Record, RecordMeta};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccount {
    pub meta: RecordMeta,
    pub bank_name: String,
    pub bank_code: String,
    pub account_name: String,
    pub account_number: String,
    pub iban: String,
    pub currency: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccountDto {
    #[serde(default)]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub bank_code: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub iban: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub password: String,
}

impl Record for BankAccount {
    const TABLE: &'static str = "bank_accounts";
    const COLUMNS: &'static [&'static str] = &[
        "bank_name",
        "bank_code",
        "account_name",
        "account_number",
        "iban",
        "currency",
        "password",
    ];
    const SEARCHABLE: &'static [&'static str] = &[
        "bank_name",
        "bank_code",
        "account_name",
        "account_number",
        "iban",
        "currency",
    ];

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn column_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.bank_name as &dyn ToSql,
            &self.bank_code,
            &self.account_name,
            &self.account_number,
            &self.iban,
            &self.currency,
            &self.password,
        ]
    }

    fn from_columns(meta: RecordMeta, row: &Row<'_>, first: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            meta,
            bank_name: row.get(first)?,
            bank_code: row.get(first + 1)?,
            account_name: row.get(first + 2)?,
            account_number: row.get(first + 3)?,
            iban: row.get(first + 4)?,
            currency: row.get(first + 5)?,
            password: row.get(first + 6)?,
        })
    }
}

impl SensitiveFields for BankAccount {
    const SENSITIVE_FIELDS: &'static [&'static str] = &["password"];

    fn sensitive_field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "password" => Some(&mut self.password),
            _ => None,
        }
    }
}

impl RecordKind for BankAccount {
    type Dto = BankAccountDto;
}

impl From<BankAccountDto> for BankAccount {
    fn from(dto: BankAccountDto) -> Self {
        Self {
            meta: RecordMeta::with_id(dto.id),
            bank_name: dto.bank_name,
            bank_code: dto.bank_code,
            account_name: dto.account_name,
            account_number: dto.account_number,
            iban: dto.iban,
            currency: dto.currency,
            password: dto.password,
        }
    }
}

impl From<BankAccount> for BankAccountDto {
    fn from(account: BankAccount) -> Self {
        Self {
            id: account.meta.id,
            created_at: Some(account.meta.created_at),
            updated_at: Some(account.meta.updated_at),
            bank_name: account.bank_name,
            bank_code: account.bank_code,
            account_name: account.account_name,
            account_number: account.account_number,
            iban: account.iban,
            currency: account.currency,
            password: account.password,
        }
    }
}
