//! The `Pet` record and the typed write set used for inserts and updates.

use serde::{Deserialize, Serialize};

use crate::types::{Gender, PetId, UNKNOWN_BREED};

/// One stored row of the `pets` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    /// `None` when the breed is unknown. Never `Some("")`.
    pub breed: Option<String>,
    pub gender: Gender,
    pub weight: u32,
}

impl Pet {
    /// The breed, or the "unknown breed" label when there is none.
    pub fn breed_label(&self) -> &str {
        self.breed.as_deref().unwrap_or(UNKNOWN_BREED)
    }
}

/// Normalize a stored breed: empty text means unknown.
pub fn normalize_breed(breed: Option<String>) -> Option<String> {
    breed.filter(|b| !b.is_empty())
}

/// Field values for an insert or update.
///
/// Every member is optional. An insert requires `name` and `gender`; an update
/// touches only the members that are present. `gender` and `weight` carry the
/// raw integers the caller supplied so out-of-range values reach validation
/// instead of being unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

impl PetValues {
    /// An empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender.code());
        self
    }

    /// Set the gender from a raw code, valid or not.
    pub fn gender_code(mut self, code: i32) -> Self {
        self.gender = Some(code);
        self
    }

    pub fn weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        [
            self.name.is_some(),
            self.breed.is_some(),
            self.gender.is_some(),
            self.weight.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Overwrite the fields of `pet` with the present values.
    ///
    /// Values are applied as given; callers validate first.
    pub fn apply_to(&self, pet: &mut Pet) {
        if let Some(name) = &self.name {
            pet.name = name.clone();
        }
        if let Some(breed) = &self.breed {
            pet.breed = normalize_breed(Some(breed.clone()));
        }
        if let Some(gender) = self.gender.and_then(Gender::from_code) {
            pet.gender = gender;
        }
        if let Some(weight) = self.weight.and_then(|w| u32::try_from(w).ok()) {
            pet.weight = weight;
        }
    }
}

impl From<&Pet> for PetValues {
    fn from(pet: &Pet) -> Self {
        Self {
            name: Some(pet.name.clone()),
            breed: pet.breed.clone(),
            gender: Some(pet.gender.code()),
            weight: i32::try_from(pet.weight).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toto() -> Pet {
        Pet {
            id: PetId(1),
            name: "Toto".into(),
            breed: Some("Terrier".into()),
            gender: Gender::Male,
            weight: 7,
        }
    }

    #[test]
    fn test_values_len() {
        assert!(PetValues::new().is_empty());
        let values = PetValues::new().name("Toto").weight(7);
        assert_eq!(values.len(), 2);
        assert!(!values.is_empty());
    }

    #[test]
    fn test_apply_only_present_fields() {
        let mut pet = toto();
        PetValues::new().weight(9).apply_to(&mut pet);
        assert_eq!(pet.weight, 9);
        assert_eq!(pet.name, "Toto");
        assert_eq!(pet.breed.as_deref(), Some("Terrier"));
    }

    #[test]
    fn test_empty_breed_clears() {
        let mut pet = toto();
        PetValues::new().breed("").apply_to(&mut pet);
        assert_eq!(pet.breed, None);
        assert_eq!(pet.breed_label(), UNKNOWN_BREED);
    }

    #[test]
    fn test_values_json_skips_absent_fields() {
        let values = PetValues::new().name("Binx").gender(Gender::Female);
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"name":"Binx","gender":2}"#);
        let back: PetValues = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
