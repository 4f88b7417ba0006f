//! Configuration system for credential-vault
//!
//! TOML file + env overrides, loaded explicitly and passed where needed.

pub use app::{
    from_toml_str, load, load_from, Config, Crypto, Database, Server, VaultSettings,
    ENV_CONFIG, ENV_DATABASE, ENV_PASSPHRASE,
};

mod app;
mod defaults;
