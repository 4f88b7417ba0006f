// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret holders used throughout credential-vault.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(FieldKey32, 32); // 256-bit ChaCha20-Poly1305 field key

// Dynamic secrets
dynamic_alias!(Passphrase, String); // process-wide vault passphrase
