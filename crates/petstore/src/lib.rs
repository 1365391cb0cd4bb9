//! # Pet Store
//!
//! An embeddable record store for pets: one table, addressed either as the
//! whole collection or as a single record, with write validation and change
//! notification.
//!
//! ## Overview
//!
//! - **Addresses**: `pets` names the collection, `pets/<id>` one record
//! - **Operations**: query, insert, update and delete, each routed by address
//! - **Validation**: writes are checked before they reach storage
//! - **Notification**: observers hear about every successful mutation
//!
//! ## Usage
//!
//! ```rust
//! use petstore::{Address, Gender, PetProvider, PetValues, ProviderConfig};
//! use petstore::store::MemoryStore;
//!
//! let provider = PetProvider::new(MemoryStore::new(), ProviderConfig::default());
//!
//! let values = PetValues::new()
//!     .name("Toto")
//!     .breed("Terrier")
//!     .gender(Gender::Male)
//!     .weight(7);
//! let toto = provider.insert(&Address::Collection, &values).unwrap();
//!
//! let cursor = provider.query(&toto, None, None, None).unwrap();
//! assert_eq!(cursor.to_pets().unwrap()[0].name, "Toto");
//! ```
//!
//! ## Re-exports
//!
//! - `petstore::core` - Record types, addressing, validation
//! - `petstore::store` - Storage abstraction, SQLite and in-memory backends

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod provider;

pub use petstore_core as core;
pub use petstore_store as store;

pub use catalog::{PetSummary, SUMMARY_PROJECTION};
pub use config::ProviderConfig;
pub use error::{ProviderError, Result};
pub use notify::{ChangeNotifier, ChangeObserver, ObserverId};
pub use provider::PetProvider;

pub use petstore_core::{
    Address, Column, Cursor, Filter, Gender, Pet, PetId, PetValues, Row, SortOrder, Value,
};
