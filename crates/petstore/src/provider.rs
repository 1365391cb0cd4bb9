//! The provider: address-routed CRUD over the pet table.
//!
//! The provider brings together addressing, validation, the backing store and
//! change notification into the four record operations.

use std::sync::Arc;

use petstore_core::{
    validate_insert, validate_update, Address, AddressError, Column, Cursor, Filter, PetValues,
    SortOrder,
};
use petstore_store::{Store, StoreError};

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::notify::{ChangeNotifier, ChangeObserver, ObserverId};

/// The record store.
///
/// Every operation takes an [`Address`]. A single-record address always
/// replaces the caller's filter with an identity filter on its id.
///
/// Notification policy:
/// - insert notifies the collection on success
/// - a non-empty update notifies the given address, even if no row matched
/// - delete notifies the given address whenever it removed at least one row
pub struct PetProvider<S: Store> {
    /// The backing table.
    store: S,
    /// Configuration.
    config: ProviderConfig,
    /// Registered observers.
    notifier: ChangeNotifier,
}

impl<S: Store> PetProvider<S> {
    /// Create a new provider over `store`.
    pub fn new(store: S, config: ProviderConfig) -> Self {
        Self {
            store,
            config,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Addressing
    // ─────────────────────────────────────────────────────────────────────────

    /// Parse a textual address under the configured authority.
    pub fn resolve(&self, address: &str) -> Result<Address> {
        Ok(Address::parse_for(address, &self.config.authority)?)
    }

    /// MIME type of the data behind `address`.
    pub fn content_type(&self, address: &Address) -> String {
        address.content_type(&self.config.authority)
    }

    /// Fully qualified form of `address`.
    pub fn uri(&self, address: &Address) -> String {
        address.to_uri(&self.config.authority)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Select records.
    ///
    /// `projection` of `None` (or empty) returns every column. `order` of
    /// `None` returns rows by ascending id. The cursor is tagged with
    /// `address` so the caller knows which notifications invalidate it.
    pub fn query(
        &self,
        address: &Address,
        projection: Option<&[Column]>,
        filter: Option<&Filter>,
        order: Option<&SortOrder>,
    ) -> Result<Cursor> {
        let filter = effective_filter(address, filter);
        let order = order.cloned().unwrap_or_default();
        let cursor = self
            .store
            .query(projection.unwrap_or(&[]), &filter, &order)?
            .with_notification_address(*address);

        if self.config.log_reads {
            tracing::debug!(address = %address, rows = cursor.len(), "queried pets");
        }
        Ok(cursor)
    }

    /// Insert a new record into the collection.
    ///
    /// Requires `name` and `gender`; rejects a negative `weight`. Returns the
    /// single-record address of the new row.
    pub fn insert(&self, address: &Address, values: &PetValues) -> Result<Address> {
        if address.is_item() {
            return Err(unsupported("insertion", address));
        }
        if let Err(e) = validate_insert(values) {
            tracing::warn!(address = %address, error = %e, "rejected insert");
            return Err(e.into());
        }

        let id = self
            .store
            .insert(values)
            .map_err(|e| storage_failure("insert", address, e))?;

        tracing::debug!(id = %id, "inserted pet");
        self.notifier.notify(address);
        Ok(Address::item(id))
    }

    /// Update the present fields of the addressed records.
    ///
    /// An empty `values` returns 0 without touching the table or notifying.
    /// Only present fields are validated.
    pub fn update(
        &self,
        address: &Address,
        values: &PetValues,
        filter: Option<&Filter>,
    ) -> Result<usize> {
        if values.is_empty() {
            return Ok(0);
        }
        if let Err(e) = validate_update(values) {
            tracing::warn!(address = %address, error = %e, "rejected update");
            return Err(e.into());
        }

        let filter = effective_filter(address, filter);
        let modified = self
            .store
            .update(values, &filter)
            .map_err(|e| storage_failure("update", address, e))?;

        tracing::debug!(address = %address, modified, "updated pets");
        self.notifier.notify(address);
        Ok(modified)
    }

    /// Delete the addressed records. Returns how many were removed.
    pub fn delete(&self, address: &Address, filter: Option<&Filter>) -> Result<usize> {
        let filter = effective_filter(address, filter);
        let deleted = self
            .store
            .delete(&filter)
            .map_err(|e| storage_failure("delete", address, e))?;

        tracing::debug!(address = %address, deleted, "deleted pets");
        if deleted > 0 {
            self.notifier.notify(address);
        }
        Ok(deleted)
    }

    /// Total number of stored records.
    pub fn count(&self) -> Result<usize> {
        Ok(self.store.count()?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Observers
    // ─────────────────────────────────────────────────────────────────────────

    /// Call `observer` after mutations that concern `address`.
    ///
    /// With `notify_for_descendants`, an observer of the collection also hears
    /// about changes to single records.
    pub fn register_observer(
        &self,
        address: Address,
        notify_for_descendants: bool,
        observer: impl ChangeObserver + 'static,
    ) -> ObserverId {
        self.notifier
            .register(address, notify_for_descendants, Arc::new(observer))
    }

    /// Stop notifying a registered observer.
    pub fn unregister_observer(&self, id: ObserverId) -> bool {
        self.notifier.unregister(id)
    }
}

/// The filter an operation actually runs with.
fn effective_filter(address: &Address, filter: Option<&Filter>) -> Filter {
    match address {
        Address::Item(id) => Filter::id(*id),
        Address::Collection => filter.cloned().unwrap_or_default(),
    }
}

fn storage_failure(operation: &'static str, address: &Address, e: StoreError) -> ProviderError {
    tracing::warn!(operation, address = %address, error = %e, "storage failure");
    ProviderError::Storage(e)
}

fn unsupported(operation: &'static str, address: &Address) -> ProviderError {
    ProviderError::InvalidAddress(AddressError::Unsupported {
        operation,
        address: address.to_string(),
    })
}
