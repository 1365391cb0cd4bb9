//! In-memory implementation of the Store trait.
//!
//! Primarily for testing and for embedding without a database file. It has
//! the same semantics as SQLite (column defaults, constraints, null handling,
//! ordering) but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use petstore_core::pet::normalize_breed;
use petstore_core::{
    is_valid_gender, Column, Cursor, Filter, Gender, Pet, PetId, PetValues, Row, SortOrder,
};

use crate::error::{Result, StoreError};
use crate::traits::{resolve_projection, Store};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Rows indexed by id, so iteration is in id order.
    pets: BTreeMap<PetId, Pet>,

    /// Last id handed out. Never decreases.
    last_id: i64,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                pets: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The table constraints SQLite enforces on the present fields.
fn check_constraints(values: &PetValues) -> Result<Option<Gender>> {
    let gender = match values.gender {
        Some(code) if is_valid_gender(code) => Gender::from_code(code),
        Some(_) => {
            return Err(StoreError::Constraint(
                "CHECK constraint failed: gender IN (0, 1, 2)".into(),
            ))
        }
        None => None,
    };
    if matches!(values.weight, Some(w) if w < 0) {
        return Err(StoreError::Constraint(
            "CHECK constraint failed: weight >= 0".into(),
        ));
    }
    Ok(gender)
}

fn not_null(column: Column) -> StoreError {
    StoreError::Constraint(format!("NOT NULL constraint failed: pets.{column}"))
}

impl Store for MemoryStore {
    fn insert(&self, values: &PetValues) -> Result<PetId> {
        let name = values.name.clone().ok_or_else(|| not_null(Column::Name))?;
        let gender = check_constraints(values)?.ok_or_else(|| not_null(Column::Gender))?;
        let weight = values
            .weight
            .map(|w| u32::try_from(w).map_err(|_| StoreError::InvalidData(format!("weight {w}"))))
            .transpose()?
            .unwrap_or(0);

        let mut inner = self.write()?;
        inner.last_id += 1;
        let id = PetId(inner.last_id);
        inner.pets.insert(
            id,
            Pet {
                id,
                name,
                breed: normalize_breed(values.breed.clone()),
                gender,
                weight,
            },
        );

        Ok(id)
    }

    fn query(&self, projection: &[Column], filter: &Filter, order: &SortOrder) -> Result<Cursor> {
        let columns = resolve_projection(projection);
        let inner = self.read()?;

        let mut matched: Vec<&Pet> = inner.pets.values().filter(|p| filter.matches(p)).collect();
        // Stable sort: ties keep id order.
        matched.sort_by(|a, b| order.compare(a, b));

        let rows = matched
            .into_iter()
            .map(|p| Row::project(p, &columns))
            .collect();
        Ok(Cursor::new(columns, rows))
    }

    fn update(&self, values: &PetValues, filter: &Filter) -> Result<usize> {
        if values.is_empty() {
            return Ok(0);
        }
        check_constraints(values)?;

        let mut inner = self.write()?;
        let mut modified = 0;
        for pet in inner.pets.values_mut().filter(|p| filter.matches(p)) {
            values.apply_to(pet);
            modified += 1;
        }

        Ok(modified)
    }

    fn delete(&self, filter: &Filter) -> Result<usize> {
        let mut inner = self.write()?;
        let before = inner.pets.len();
        inner.pets.retain(|_, p| !filter.matches(p));
        Ok(before - inner.pets.len())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.read()?.pets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StoreExt;
    use petstore_core::Value;

    fn toto() -> PetValues {
        PetValues::new()
            .name("Toto")
            .breed("Terrier")
            .gender(Gender::Male)
            .weight(7)
    }

    #[test]
    fn test_memory_store_basic() {
        let store = MemoryStore::new();
        let id = store.insert(&toto()).unwrap();

        let pet = store.get_pet(id).unwrap().unwrap();
        assert_eq!(pet.name, "Toto");
        assert_eq!(pet.breed.as_deref(), Some("Terrier"));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_memory_store_constraints() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.insert(&PetValues::new().gender(Gender::Male)),
            Err(StoreError::Constraint(_))
        ));
        assert!(matches!(
            store.insert(&PetValues::new().name("Rex")),
            Err(StoreError::Constraint(_))
        ));
        assert!(matches!(
            store.insert(&toto().weight(-1)),
            Err(StoreError::Constraint(_))
        ));
        assert_eq!(store.count().unwrap(), 0);

        store.insert(&toto()).unwrap();
        assert!(matches!(
            store.update(&PetValues::new().gender_code(4), &Filter::all()),
            Err(StoreError::Constraint(_))
        ));
        assert_eq!(store.all_pets().unwrap()[0].gender, Gender::Male);
    }

    #[test]
    fn test_memory_store_ids_monotonic() {
        let store = MemoryStore::new();
        let a = store.insert(&toto()).unwrap();
        let b = store.insert(&toto()).unwrap();
        store.delete(&Filter::all()).unwrap();
        let c = store.insert(&toto()).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_memory_store_delete_filter() {
        let store = MemoryStore::new();
        for (name, weight) in [("A", 1), ("B", 5), ("C", 10)] {
            store.insert(&toto().name(name).weight(weight)).unwrap();
        }
        let removed = store
            .delete(&Filter::all().at_least(Column::Weight, 5))
            .unwrap();
        assert_eq!(removed, 2);
        let left = store.all_pets().unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].name, "A");
    }

    #[test]
    fn test_memory_store_breed_null_filter() {
        let store = MemoryStore::new();
        store.insert(&toto()).unwrap();
        store.insert(&toto().breed("")).unwrap();
        let cursor = store
            .query(
                &[Column::Id],
                &Filter::all().equals(Column::Breed, Value::Null),
                &SortOrder::none(),
            )
            .unwrap();
        assert_eq!(cursor.len(), 1);
        assert_eq!(cursor.rows()[0].get_i64(Column::Id), Some(2));
    }
}
