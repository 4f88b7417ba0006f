// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for user-visible choices that come from configuration.

use serde::{Deserialize, Serialize};

/// What a list read does when one record's sensitive field cannot be
/// decrypted. Single-record reads always surface the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecryptFailurePolicy {
    /// Fail the whole read with the first error.
    #[default]
    Abort,
    /// Drop the unreadable record and log a warning.
    Skip,
}
