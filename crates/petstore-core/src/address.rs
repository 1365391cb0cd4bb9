//! Record addressing.
//!
//! Every store operation is addressed either at the whole collection
//! (`pets`) or at a single record (`pets/<id>`). [`Address::parse`] maps a
//! textual address to one of the two shapes; anything else is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AddressError;
use crate::types::{PetId, CONTENT_AUTHORITY, PATH_PETS};

/// Scheme of a fully qualified address.
pub const CONTENT_SCHEME: &str = "content";

/// MIME prefix for a collection of records.
pub const CONTENT_DIR_PREFIX: &str = "vnd.android.cursor.dir";

/// MIME prefix for a single record.
pub const CONTENT_ITEM_PREFIX: &str = "vnd.android.cursor.item";

/// The two addressing shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Address {
    /// All records.
    Collection,
    /// The record with the given id.
    Item(PetId),
}

impl Address {
    /// Address of a single record.
    pub const fn item(id: PetId) -> Self {
        Address::Item(id)
    }

    /// The record id of an item address.
    pub const fn id(&self) -> Option<PetId> {
        match self {
            Address::Collection => None,
            Address::Item(id) => Some(*id),
        }
    }

    pub const fn is_item(&self) -> bool {
        matches!(self, Address::Item(_))
    }

    /// Parse an address under the default authority.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        Self::parse_for(input, CONTENT_AUTHORITY)
    }

    /// Parse an address, accepting fully qualified forms only for `authority`.
    ///
    /// Accepted: `pets`, `/pets`, `pets/<digits>`, `/pets/<digits>` and
    /// `content://<authority>/pets[/<digits>]`. A single trailing slash is
    /// tolerated.
    pub fn parse_for(input: &str, authority: &str) -> Result<Self, AddressError> {
        let path = match input.split_once("://") {
            Some((scheme, rest)) => {
                if scheme != CONTENT_SCHEME {
                    return Err(AddressError::UnsupportedScheme(input.to_string()));
                }
                let (found, path) = rest.split_once('/').unwrap_or((rest, ""));
                if found != authority {
                    return Err(AddressError::UnknownAuthority {
                        address: input.to_string(),
                        authority: found.to_string(),
                    });
                }
                path
            }
            None => input.strip_prefix('/').unwrap_or(input),
        };
        let path = path.strip_suffix('/').unwrap_or(path);

        let mut segments = path.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(PATH_PETS), None, None) => Ok(Address::Collection),
            (Some(PATH_PETS), Some(id), None) => parse_id(id)
                .map(Address::Item)
                .ok_or_else(|| AddressError::InvalidId(input.to_string())),
            _ => Err(AddressError::Unrecognized(input.to_string())),
        }
    }

    /// Fully qualified form of this address.
    pub fn to_uri(&self, authority: &str) -> String {
        format!("{CONTENT_SCHEME}://{authority}/{self}")
    }

    /// MIME type of the data behind this address.
    pub fn content_type(&self, authority: &str) -> String {
        let prefix = match self {
            Address::Collection => CONTENT_DIR_PREFIX,
            Address::Item(_) => CONTENT_ITEM_PREFIX,
        };
        format!("{prefix}/{authority}/{PATH_PETS}")
    }

    /// Whether a change notified for `changed` concerns an observer of `self`.
    ///
    /// A change to the collection concerns every item. A change to an item
    /// concerns a collection observer only if it asked for descendants.
    pub fn covers(&self, changed: &Address, notify_for_descendants: bool) -> bool {
        match (self, changed) {
            (a, b) if a == b => true,
            (Address::Item(_), Address::Collection) => true,
            (Address::Collection, Address::Item(_)) => notify_for_descendants,
            _ => false,
        }
    }
}

fn parse_id(segment: &str) -> Option<PetId> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse::<i64>().ok().map(PetId)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Collection => f.write_str(PATH_PETS),
            Address::Item(id) => write!(f, "{PATH_PETS}/{id}"),
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<PetId> for Address {
    fn from(id: PetId) -> Self {
        Address::Item(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_paths() {
        assert_eq!(Address::parse("pets").unwrap(), Address::Collection);
        assert_eq!(Address::parse("/pets").unwrap(), Address::Collection);
        assert_eq!(Address::parse("pets/").unwrap(), Address::Collection);
        assert_eq!(Address::parse("pets/7").unwrap(), Address::Item(PetId(7)));
        assert_eq!(Address::parse("/pets/0").unwrap(), Address::Item(PetId(0)));
    }

    #[test]
    fn test_parse_full_uri() {
        let uri = "content://com.example.android.pets/pets/12";
        assert_eq!(Address::parse(uri).unwrap(), Address::Item(PetId(12)));
        assert_eq!(
            Address::parse("content://com.example.android.pets/pets").unwrap(),
            Address::Collection
        );
        assert_eq!(
            Address::parse_for("content://shelter/pets/3", "shelter").unwrap(),
            Address::Item(PetId(3))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_shapes() {
        for input in ["", "/", "cats", "pets/1/2", "petsy", "dogs/1"] {
            assert!(
                matches!(Address::parse(input), Err(AddressError::Unrecognized(_))),
                "{input:?} should be unrecognized"
            );
        }
    }

    #[test]
    fn test_parse_rejects_bad_ids() {
        for input in [
            "pets/abc",
            "pets/-1",
            "pets/+1",
            "pets/1.5",
            "pets//",
            "pets/99999999999999999999",
        ] {
            assert!(
                matches!(Address::parse(input), Err(AddressError::InvalidId(_))),
                "{input:?} should have an invalid id"
            );
        }
    }

    #[test]
    fn test_parse_rejects_foreign_uris() {
        assert!(matches!(
            Address::parse("https://com.example.android.pets/pets"),
            Err(AddressError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            Address::parse("content://other.app/pets/1"),
            Err(AddressError::UnknownAuthority { .. })
        ));
        assert!(matches!(
            Address::parse("content://com.example.android.pets"),
            Err(AddressError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_display_and_uri() {
        let item = Address::item(PetId(5));
        assert_eq!(item.to_string(), "pets/5");
        assert_eq!(Address::Collection.to_string(), "pets");
        assert_eq!(item.to_uri(CONTENT_AUTHORITY), "content://com.example.android.pets/pets/5");
        assert_eq!(Address::parse(&item.to_uri(CONTENT_AUTHORITY)).unwrap(), item);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(
            Address::Collection.content_type(CONTENT_AUTHORITY),
            "vnd.android.cursor.dir/com.example.android.pets/pets"
        );
        assert_eq!(
            Address::item(PetId(1)).content_type(CONTENT_AUTHORITY),
            "vnd.android.cursor.item/com.example.android.pets/pets"
        );
    }

    #[test]
    fn test_covers() {
        let one = Address::item(PetId(1));
        let two = Address::item(PetId(2));

        assert!(one.covers(&one, false));
        assert!(!one.covers(&two, true));
        assert!(one.covers(&Address::Collection, false));
        assert!(Address::Collection.covers(&Address::Collection, false));
        assert!(!Address::Collection.covers(&one, false));
        assert!(Address::Collection.covers(&one, true));
    }
}
