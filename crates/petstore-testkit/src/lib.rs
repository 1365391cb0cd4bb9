//! # Pet Store Testkit
//!
//! Testing utilities for the pet record store.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Samples**: A small known data set to seed stores with
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A provider wired to a recording observer
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use petstore_testkit::generators::valid_insert;
//!
//! proptest! {
//!     #[test]
//!     fn valid_values_insert(values in valid_insert()) {
//!         let fixture = petstore_testkit::TestFixture::new();
//!         prop_assert!(fixture.insert(&values).is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use petstore_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::seeded();
//! assert_eq!(fixture.provider.count().unwrap(), 5);
//! assert!(fixture.observer.is_empty());
//! ```

pub mod fixtures;
pub mod generators;
pub mod samples;

pub use fixtures::{RecordingObserver, TestFixture};
pub use generators::{invalid_insert, valid_insert, valid_update};
pub use samples::sample_pets;
