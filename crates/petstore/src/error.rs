//! Error types for the record store.

use petstore_core::{AddressError, CoreError, ValidationError};
use petstore_store::StoreError;
use thiserror::Error;

/// Errors that can occur during provider operations.
///
/// None of them are retried internally. A failed insert leaves no row behind
/// and emits no notification.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The address matches no known shape, or the operation does not accept
    /// that shape.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// A field-level rule was violated.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The backing table failed the request.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// A returned row could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] CoreError),
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
