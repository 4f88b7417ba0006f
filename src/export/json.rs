use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::consts::EXPORT_FORMAT;
use crate::enums::DecryptFailurePolicy;
use crate::error::{Result, VaultError};
use crate::filter::FilterSpec;
use crate::model::{BankAccount, CreditCard, Email, Login, Note, RecordKind};
use crate::vault::Vault;

fn export_kind<E: RecordKind>(vault: &Vault) -> Result<Vec<Value>> {
    // a backup must never silently lose records
    let records = vault
        .records::<E>()?
        .with_policy(DecryptFailurePolicy::Abort)
        .find_all_with(&FilterSpec::default())?;
    records
        .into_iter()
        .map(|dto| serde_json::to_value(dto).map_err(VaultError::from))
        .collect()
}

/// Every active record of every kind, decrypted, as one JSON document.
///
/// SECURITY WARNING: the result contains every secret in cleartext.
pub fn export_to_json(vault: &Vault) -> Result<Value> {
    let logins = export_kind::<Login>(vault)?;
    let credit_cards = export_kind::<CreditCard>(vault)?;
    let bank_accounts = export_kind::<BankAccount>(vault)?;
    let notes = export_kind::<Note>(vault)?;
    let emails = export_kind::<Email>(vault)?;

    let total =
        logins.len() + credit_cards.len() + bank_accounts.len() + notes.len() + emails.len();

    Ok(json!({
        "export_format": EXPORT_FORMAT,
        "exported_at": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "exporter_version": env!("CARGO_PKG_VERSION"),
        "total_records": total,
        "warning": "THIS FILE CONTAINS ALL SECRETS IN PLAINTEXT. ENCRYPT OR DELETE IMMEDIATELY AFTER USE.",
        "logins": logins,
        "credit_cards": credit_cards,
        "bank_accounts": bank_accounts,
        "notes": notes,
        "emails": emails,
    }))
}

/// Write [`export_to_json`] to `path`, returning the number of records.
pub fn write_json<P: AsRef<Path>>(vault: &Vault, path: P) -> Result<u64> {
    let export = export_to_json(vault)?;
    std::fs::write(path.as_ref(), serde_json::to_string_pretty(&export)?)?;

    let total = export["total_records"].as_u64().unwrap_or_default();
    info!(records = total, path = %path.as_ref().display(), "exported vault");
    warn!("export file holds plaintext secrets");
    Ok(total)
}
