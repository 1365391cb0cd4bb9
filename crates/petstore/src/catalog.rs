//! Catalog helpers for list screens and demos.

use petstore_core::{Address, Column, Gender, PetId, PetValues, SortOrder, UNKNOWN_BREED};
use petstore_store::Store;

use crate::error::{ProviderError, Result};
use crate::provider::PetProvider;

/// Columns a list screen needs.
pub const SUMMARY_PROJECTION: [Column; 3] = [Column::Id, Column::Name, Column::Breed];

/// One line of the pet list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetSummary {
    pub id: PetId,
    pub name: String,
    /// Breed, or "Unknown breed" when none is recorded.
    pub breed_label: String,
}

/// The sample record inserted by [`insert_dummy_pet`].
pub fn dummy_pet() -> PetValues {
    PetValues::new()
        .name("Toto")
        .breed("Terrier")
        .gender(Gender::Male)
        .weight(7)
}

/// Every pet as a summary, in id order.
pub fn list_summaries<S: Store>(provider: &PetProvider<S>) -> Result<Vec<PetSummary>> {
    let cursor = provider.query(
        &Address::Collection,
        Some(&SUMMARY_PROJECTION),
        None,
        Some(&SortOrder::none().asc(Column::Id)),
    )?;

    cursor
        .iter()
        .map(|row| {
            let id = row
                .get_i64(Column::Id)
                .ok_or_else(|| missing(Column::Id))?;
            let name = row
                .get_str(Column::Name)
                .ok_or_else(|| missing(Column::Name))?;
            let breed_label = match row.get_str(Column::Breed) {
                Some(breed) if !breed.is_empty() => breed,
                _ => UNKNOWN_BREED,
            };
            Ok(PetSummary {
                id: PetId(id),
                name: name.to_string(),
                breed_label: breed_label.to_string(),
            })
        })
        .collect()
}

/// Insert the sample pet. Returns its address.
pub fn insert_dummy_pet<S: Store>(provider: &PetProvider<S>) -> Result<Address> {
    provider.insert(&Address::Collection, &dummy_pet())
}

/// Remove every pet. Returns how many were removed.
pub fn delete_all_pets<S: Store>(provider: &PetProvider<S>) -> Result<usize> {
    provider.delete(&Address::Collection, None)
}

fn missing(column: Column) -> ProviderError {
    ProviderError::Decode(petstore_core::CoreError::MissingColumn(column))
}
