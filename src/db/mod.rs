//! SQLite persistence: schema, generic repository, shared store.

mod record;
mod repository;
mod store;
mod vault_db_conn;

pub use record::{Record, RecordMeta, META_COLUMNS};
pub use repository::Repository;
pub use store::Store;
pub use vault_db_conn::{open_vault_db, open_vault_db_in_memory};
