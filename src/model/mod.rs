//! Record kinds: entities, their wire DTOs and their sensitive-field sets.

mod bank_account;
mod credit_card;
mod email;
mod login;
mod note;

pub use bank_account::{BankAccount, BankAccountDto};
pub use credit_card::{CreditCard, CreditCardDto};
pub use email::{Email, EmailDto};
pub use login::{Login, LoginDto};
pub use note::{Note, NoteDto};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::Record;

/// Fields whose at-rest value is base64 ciphertext.
///
/// `SENSITIVE_FIELDS` is owned by the kind and is not configurable.
/// `sensitive_field_mut` must resolve every name in it.
pub trait SensitiveFields {
    const SENSITIVE_FIELDS: &'static [&'static str];

    fn sensitive_field_mut(&mut self, name: &str) -> Option<&mut String>;
}

/// A storable kind with a wire representation.
pub trait RecordKind: Record + SensitiveFields {
    type Dto: From<Self> + Into<Self> + Serialize + DeserializeOwned + Clone + Send;
}
