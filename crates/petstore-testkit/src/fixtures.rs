//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::{Arc, Mutex, PoisonError};

use petstore::{Address, ChangeObserver, PetProvider, PetValues, ProviderConfig};
use petstore_store::MemoryStore;

use crate::samples::sample_pets;

/// Observer that records every address it is notified about.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    seen: Arc<Mutex<Vec<Address>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses received so far, oldest first.
    pub fn seen(&self) -> Vec<Address> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything received so far.
    pub fn clear(&self) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ChangeObserver for RecordingObserver {
    fn on_change(&self, changed: &Address) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*changed);
    }
}

/// A memory-backed provider with a recording observer on the collection.
///
/// The observer is registered with `notify_for_descendants`, so it hears
/// about every mutation.
pub struct TestFixture {
    pub provider: PetProvider<MemoryStore>,
    pub observer: RecordingObserver,
}

impl TestFixture {
    /// Create an empty fixture.
    pub fn new() -> Self {
        let provider = PetProvider::new(MemoryStore::new(), ProviderConfig::default());
        let observer = RecordingObserver::new();
        provider.register_observer(Address::Collection, true, observer.clone());
        Self { provider, observer }
    }

    /// Create a fixture holding the sample pets, with the observer cleared.
    pub fn seeded() -> Self {
        let fixture = Self::new();
        for values in sample_pets() {
            // Samples are valid; a failure here shows up as a short count.
            let _ = fixture.insert(&values);
        }
        fixture.observer.clear();
        fixture
    }

    /// Insert into the collection.
    pub fn insert(&self, values: &PetValues) -> petstore::Result<Address> {
        self.provider.insert(&Address::Collection, values)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
