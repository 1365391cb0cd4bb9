//! Strong type definitions for the pet contract.
//!
//! Identifiers and enumerations are newtypes so a raw integer never stands in
//! for a record id or a gender code by accident.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Authority under which the record store publishes its addresses.
pub const CONTENT_AUTHORITY: &str = "com.example.android.pets";

/// Path segment naming the pet collection.
pub const PATH_PETS: &str = "pets";

/// Name of the backing table.
pub const TABLE_NAME: &str = "pets";

/// Label shown for a pet whose breed is not known.
pub const UNKNOWN_BREED: &str = "Unknown breed";

/// A store-assigned record identifier.
///
/// Ids are assigned on insert, never change, and are never handed out again
/// once the record is deleted.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(pub i64);

impl PetId {
    /// Create a new PetId from its raw value.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Debug for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PetId({})", self.0)
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PetId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// Gender of a pet, stored as a small integer code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Unknown,
    Male,
    Female,
}

impl Gender {
    pub const UNKNOWN_CODE: i32 = 0;
    pub const MALE_CODE: i32 = 1;
    pub const FEMALE_CODE: i32 = 2;

    /// The integer code persisted in the `gender` column.
    pub const fn code(self) -> i32 {
        match self {
            Gender::Unknown => Self::UNKNOWN_CODE,
            Gender::Male => Self::MALE_CODE,
            Gender::Female => Self::FEMALE_CODE,
        }
    }

    /// Map a stored code back to a gender.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::UNKNOWN_CODE => Some(Gender::Unknown),
            Self::MALE_CODE => Some(Gender::Male),
            Self::FEMALE_CODE => Some(Gender::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Unknown => "unknown",
            Gender::Male => "male",
            Gender::Female => "female",
        };
        f.write_str(s)
    }
}

impl From<Gender> for i32 {
    fn from(gender: Gender) -> Self {
        gender.code()
    }
}

/// Whether `code` is one of the three gender codes.
pub fn is_valid_gender(code: i32) -> bool {
    Gender::from_code(code).is_some()
}

/// A column of the `pets` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    Id,
    Name,
    Breed,
    Gender,
    Weight,
}

impl Column {
    /// Every column, in table order.
    pub const ALL: [Column; 5] = [
        Column::Id,
        Column::Name,
        Column::Breed,
        Column::Gender,
        Column::Weight,
    ];

    /// The column name as it appears in the table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Column::Id => "_id",
            Column::Name => "name",
            Column::Breed => "breed",
            Column::Gender => "gender",
            Column::Weight => "weight",
        }
    }

    /// Whether the column holds integers (as opposed to text).
    pub const fn is_integer(self) -> bool {
        matches!(self, Column::Id | Column::Gender | Column::Weight)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| crate::error::CoreError::UnknownColumn(s.to_string()))
    }
}
