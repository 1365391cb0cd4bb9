//! Write validation.
//!
//! Inserts and updates apply the same three rules with one asymmetry: an
//! insert requires `name` and `gender` to be present, an update only checks
//! the fields it carries.

use crate::error::ValidationError;
use crate::pet::PetValues;
use crate::types::is_valid_gender;

/// Validate the values of a new record.
///
/// Checks, in order:
/// 1. `name` present and non-empty
/// 2. `gender` present and one of the three codes
/// 3. `weight`, if present, not negative
pub fn validate_insert(values: &PetValues) -> Result<(), ValidationError> {
    check_name(values.name.as_deref())?;
    check_gender(values.gender)?;
    if let Some(weight) = values.weight {
        check_weight(weight)?;
    }
    Ok(())
}

/// Validate the values of an update. Absent fields are not checked.
pub fn validate_update(values: &PetValues) -> Result<(), ValidationError> {
    if let Some(name) = values.name.as_deref() {
        check_name(Some(name))?;
    }
    if let Some(gender) = values.gender {
        check_gender(Some(gender))?;
    }
    if let Some(weight) = values.weight {
        check_weight(weight)?;
    }
    Ok(())
}

fn check_name(name: Option<&str>) -> Result<(), ValidationError> {
    match name {
        Some(name) if !name.is_empty() => Ok(()),
        _ => Err(ValidationError::NameRequired),
    }
}

fn check_gender(code: Option<i32>) -> Result<(), ValidationError> {
    match code {
        Some(code) if is_valid_gender(code) => Ok(()),
        code => Err(ValidationError::InvalidGender { code }),
    }
}

fn check_weight(weight: i32) -> Result<(), ValidationError> {
    if weight < 0 {
        return Err(ValidationError::InvalidWeight { weight });
    }
    Ok(())
}
