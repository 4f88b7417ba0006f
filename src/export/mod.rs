// src/export/mod.rs
//! Export utilities for credential-vault
//!
//! Exports are plaintext by nature: every sensitive field is decrypted.

pub use json::{export_to_json, write_json};

pub mod json;
