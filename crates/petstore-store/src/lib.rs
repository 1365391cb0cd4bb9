//! # Pet Store Backing Table
//!
//! Storage abstraction for the pet record store. Provides a trait-based
//! interface for the single `pets` table with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The [`Store`] trait executes already-addressed CRUD requests: insert a row,
//! select rows under a [`Filter`](petstore_core::Filter), update or delete the
//! matching rows. Address routing, field validation and change notification
//! live in the provider that fronts the store.
//!
//! ## Key Types
//!
//! - [`Store`] - The synchronous trait for all table operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage with the same semantics
//!
//! ## Usage
//!
//! ```rust,no_run
//! use petstore_core::{Filter, Gender, PetValues, SortOrder};
//! use petstore_store::{SqliteStore, Store};
//!
//! let store = SqliteStore::open("pets.db").unwrap();
//! let id = store
//!     .insert(&PetValues::new().name("Toto").gender(Gender::Male))
//!     .unwrap();
//! let cursor = store.query(&[], &Filter::id(id), &SortOrder::none()).unwrap();
//! assert_eq!(cursor.len(), 1);
//! ```
//!
//! ## Design Notes
//!
//! - **Ids are never reused**: SQLite uses `AUTOINCREMENT`, the memory store a
//!   monotonic counter.
//! - **Constraints, not validation**: stores reject NOT NULL and CHECK
//!   violations as [`StoreError::Constraint`]; they do not apply the
//!   provider's field rules.
//! - **Deterministic order**: rows come back by ascending id unless a sort
//!   order is given, and ties under a sort order also fall back to id.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{Store, StoreExt};
