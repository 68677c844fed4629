//! Error types for pwstore.

use crate::crypto::DecodeFailed;
use thiserror::Error;

/// Main error type for store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Key must be exactly 3 bytes, got {length}")]
    InvalidToken { length: usize },

    #[error("Authentication failed. Access denied")]
    Unauthorized,

    #[error("Password not found: {0}")]
    NotFound(String),

    #[error("Incorrect decryption key")]
    WrongToken(#[from] DecodeFailed),

    #[error("No operations to undo")]
    NothingToUndo,

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised while turning command-line options into a shell config.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Admin PIN must not be empty")]
    EmptyPin,

    #[error("PIN attempts must be at least 1")]
    NoAttempts,

    #[error("Password length must be between 1 and {maximum}, got {length}")]
    PasswordLength { length: usize, maximum: usize },
}
