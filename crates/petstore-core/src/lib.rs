//! # Pet Store Core
//!
//! The contract of the pet record store: record shape, column names, gender
//! codes, addressing and write validation.
//!
//! This crate contains no I/O and no storage. It is the single source of truth
//! that the store backends and the provider agree on.
//!
//! ## Key Types
//!
//! - [`Pet`] - One stored record
//! - [`PetValues`] - Typed field set for inserts and updates
//! - [`Address`] - Collection or single-record address
//! - [`Filter`], [`SortOrder`] - Typed query restrictions
//! - [`Cursor`], [`Row`] - Query results honoring a projection
//!
//! ## Addressing
//!
//! ```rust
//! use petstore_core::{Address, PetId};
//!
//! assert_eq!(Address::parse("pets").unwrap(), Address::Collection);
//! assert_eq!(Address::parse("pets/3").unwrap(), Address::Item(PetId(3)));
//! assert!(Address::parse("pets/abc").is_err());
//! ```

pub mod address;
pub mod error;
pub mod pet;
pub mod query;
pub mod types;
pub mod validation;

pub use address::Address;
pub use error::{AddressError, CoreError, ValidationError};
pub use pet::{Pet, PetValues};
pub use query::{CompareOp, Cursor, Filter, Predicate, Row, SortKey, SortOrder, Value};
pub use types::{
    is_valid_gender, Column, Gender, PetId, CONTENT_AUTHORITY, PATH_PETS, TABLE_NAME,
    UNKNOWN_BREED,
};
pub use validation::{validate_insert, validate_update};
