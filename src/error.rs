// src/error.rs
//! Public error type for the entire crate

use rusqlite::ErrorCode;
use thiserror::Error;

use crate::crypto::CryptoError;

pub type Result<T> = std::result::Result<T, VaultError>;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid filter field: {0}")]
    InvalidFilterField(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    #[error("crypto operation failed: {0}")]
    Crypto(#[from] CryptoError),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("database error: {0}")]
    Storage(rusqlite::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse classification handed to the request layer for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Crypto,
    ConstraintViolation,
    StorageUnavailable,
    Internal,
}

impl ErrorKind {
    /// Only transport-level storage failures are worth a caller retry.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::StorageUnavailable)
    }
}

impl VaultError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::Validation(_) | VaultError::InvalidFilterField(_) => ErrorKind::Validation,
            VaultError::NotFound { .. } => ErrorKind::NotFound,
            VaultError::Crypto(_) => ErrorKind::Crypto,
            VaultError::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            VaultError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            VaultError::Storage(_)
            | VaultError::Config(_)
            | VaultError::Io(_)
            | VaultError::Serialization(_)
            | VaultError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn not_found(kind: &'static str, id: u64) -> Self {
        VaultError::NotFound { kind, id }
    }
}

impl From<rusqlite::Error> for VaultError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg) => {
                let detail = msg.clone().unwrap_or_else(|| e.to_string());
                match e.code {
                    ErrorCode::ConstraintViolation => VaultError::ConstraintViolation(detail),
                    // transient conditions only; a corrupt or foreign file stays `Storage`
                    ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
                    | ErrorCode::CannotOpen
                    | ErrorCode::SystemIoFailure => VaultError::StorageUnavailable(detail),
                    _ => VaultError::Storage(err),
                }
            }
            _ => VaultError::Storage(err),
        }
    }
}

impl From<toml::de::Error> for VaultError {
    fn from(err: toml::de::Error) -> Self {
        VaultError::Config(err.to_string())
    }
}
