//! Known sample data.
//!
//! Five pets covering every gender code, a missing breed and the default
//! weight. Two of them weigh more than 10.

use petstore_core::PetValues;

const SAMPLE_PETS_JSON: &str = r#"[
    { "name": "Toto",     "breed": "Terrier",  "gender": 1, "weight": 7 },
    { "name": "Binx",     "breed": "Bombay",   "gender": 1, "weight": 4 },
    { "name": "Lady",     "breed": "Cocker",   "gender": 2, "weight": 12 },
    { "name": "Tramp",                         "gender": 1, "weight": 14 },
    { "name": "Garfield", "breed": "",         "gender": 0 }
]"#;

/// Number of sample pets weighing more than 10.
pub const HEAVY_SAMPLE_COUNT: usize = 2;

/// The sample pets, in insertion order.
pub fn sample_pets() -> Vec<PetValues> {
    serde_json::from_str(SAMPLE_PETS_JSON).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use petstore_core::validate_insert;

    #[test]
    fn test_samples_parse_and_validate() {
        let pets = sample_pets();
        assert_eq!(pets.len(), 5);
        for values in &pets {
            validate_insert(values).unwrap();
        }
        assert_eq!(pets[3].breed, None);
        assert_eq!(pets[4].weight, None);
        assert_eq!(
            pets.iter()
                .filter(|p| p.weight.unwrap_or(0) > 10)
                .count(),
            HEAVY_SAMPLE_COUNT
        );
    }
}
