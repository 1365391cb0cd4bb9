//! Store trait: the abstract interface for the backing table.
//!
//! The store executes already-addressed requests against the `pets` table.
//! It enforces storage constraints only; field validation and addressing
//! belong to the provider in front of it.

use std::sync::Arc;

use petstore_core::{Column, Cursor, Filter, Pet, PetId, PetValues, SortOrder};

use crate::error::Result;

/// The Store trait: synchronous interface for record persistence.
///
/// Implementations serialize concurrent callers with their own lock. Every
/// method runs to completion before returning.
pub trait Store: Send + Sync {
    /// Insert a new row and return its assigned id.
    ///
    /// Ids are unique and never reused, even after the row is deleted.
    fn insert(&self, values: &PetValues) -> Result<PetId>;

    /// Select rows matching `filter`, restricted to `projection`, in `order`.
    ///
    /// An empty projection selects every column. An empty order returns rows
    /// by ascending id.
    fn query(&self, projection: &[Column], filter: &Filter, order: &SortOrder) -> Result<Cursor>;

    /// Overwrite the present fields of every row matching `filter`.
    ///
    /// Returns the number of rows matched.
    fn update(&self, values: &PetValues, filter: &Filter) -> Result<usize>;

    /// Remove every row matching `filter`. Returns the number removed.
    fn delete(&self, filter: &Filter) -> Result<usize>;

    /// Number of stored rows.
    fn count(&self) -> Result<usize>;
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn insert(&self, values: &PetValues) -> Result<PetId> {
        (**self).insert(values)
    }

    fn query(&self, projection: &[Column], filter: &Filter, order: &SortOrder) -> Result<Cursor> {
        (**self).query(projection, filter, order)
    }

    fn update(&self, values: &PetValues, filter: &Filter) -> Result<usize> {
        (**self).update(values, filter)
    }

    fn delete(&self, filter: &Filter) -> Result<usize> {
        (**self).delete(filter)
    }

    fn count(&self) -> Result<usize> {
        (**self).count()
    }
}

/// Extension trait for common store patterns.
pub trait StoreExt: Store {
    /// Fetch one full record by id.
    fn get_pet(&self, id: PetId) -> Result<Option<Pet>> {
        let cursor = self.query(&Column::ALL, &Filter::id(id), &SortOrder::none())?;
        match cursor.first() {
            Some(row) => Ok(Some(Pet::try_from(row)?)),
            None => Ok(None),
        }
    }

    /// Fetch every record by ascending id.
    fn all_pets(&self) -> Result<Vec<Pet>> {
        let cursor = self.query(&Column::ALL, &Filter::all(), &SortOrder::none())?;
        Ok(cursor.to_pets()?)
    }
}

impl<S: Store + ?Sized> StoreExt for S {}

/// Expand an empty projection to every column.
pub(crate) fn resolve_projection(projection: &[Column]) -> Vec<Column> {
    if projection.is_empty() {
        Column::ALL.to_vec()
    } else {
        projection.to_vec()
    }
}
