//! Error types for the pet contract.

use thiserror::Error;

use crate::types::Column;

/// Errors raised while interpreting contract-level data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("row is missing column {0}")]
    MissingColumn(Column),

    #[error("malformed row: {0}")]
    MalformedRow(String),
}

/// An address that matches neither the collection nor the single-record shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("unknown address: {0}")]
    Unrecognized(String),

    #[error("unsupported scheme in address: {0}")]
    UnsupportedScheme(String),

    #[error("unknown authority {authority} in address {address}")]
    UnknownAuthority { address: String, authority: String },

    #[error("invalid record id in address: {0}")]
    InvalidId(String),

    #[error("{operation} is not supported for {address}")]
    Unsupported {
        operation: &'static str,
        address: String,
    },
}

/// Field-level rule violations detected before a write reaches the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name required")]
    NameRequired,

    #[error("invalid gender")]
    InvalidGender { code: Option<i32> },

    #[error("invalid weight")]
    InvalidWeight { weight: i32 },
}

/// Result type for contract operations.
pub type Result<T> = std::result::Result<T, CoreError>;
