// Copyright 2025 Cowboy AI, LLC.

//! Typed identifiers for aggregates
//!
//! An [`EntityId`] is a validated UUID string tagged with the entity type it
//! identifies. The phantom type parameter keeps ids of different aggregates
//! from being mixed up at compile time, which is what makes two ids equal only
//! when both the value and the identified type match.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::InvalidIdentifierError;

/// Length of the hyphenated UUID text form
const HYPHENATED_LEN: usize = 36;

/// A typed, validated UUID identifier
///
/// # Examples
///
/// ```rust
/// use catalog_domain::{EntityId, InvalidIdentifierError};
///
/// struct Order;
///
/// let id = EntityId::<Order>::parse("9366b7dc-2d71-4799-b91c-c64adb205104").unwrap();
/// assert_eq!(id.as_str(), "9366b7dc-2d71-4799-b91c-c64adb205104");
///
/// let err = EntityId::<Order>::parse("fake id").unwrap_err();
/// assert_eq!(err, InvalidIdentifierError::new("fake id"));
/// ```
pub struct EntityId<T> {
    value: String,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> EntityId<T> {
    /// Generate a new random identifier
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Validate and wrap a raw identifier
    ///
    /// Only the hyphenated 36 character form is accepted; the raw text is kept
    /// verbatim.
    pub fn parse(value: impl Into<String>) -> Result<Self, InvalidIdentifierError> {
        let value = value.into();
        if value.len() != HYPHENATED_LEN || Uuid::try_parse(&value).is_err() {
            return Err(InvalidIdentifierError::new(value));
        }
        Ok(Self {
            value,
            _phantom: PhantomData,
        })
    }

    /// Validate an optional raw identifier, generating one when absent
    pub fn parse_or_generate(value: Option<&str>) -> Result<Self, InvalidIdentifierError> {
        match value {
            Some(raw) => Self::parse(raw),
            None => Ok(Self::new()),
        }
    }

    /// Wrap an existing UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self {
            value: id.hyphenated().to_string(),
            _phantom: PhantomData,
        }
    }

    /// The underlying string value
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume into the underlying string value
    pub fn into_string(self) -> String {
        self.value
    }

    /// Convert to an id of a different entity type (use with caution)
    pub fn cast<U>(self) -> EntityId<U> {
        EntityId {
            value: self.value,
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for EntityId<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityId").field(&self.value).finish()
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for EntityId<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<T> FromStr for EntityId<T> {
    type Err = InvalidIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T> TryFrom<String> for EntityId<T> {
    type Error = InvalidIdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl<T> TryFrom<&str> for EntityId<T> {
    type Error = InvalidIdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl<T> From<EntityId<T>> for String {
    fn from(id: EntityId<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for EntityId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for EntityId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

/// Insertion-ordered set of identifiers keyed by their value
///
/// Used for many-to-many references held by an aggregate (a genre's
/// categories, a video's cast members). Relations are by id only.
pub struct OrderedIdSet<T> {
    ids: IndexMap<String, EntityId<T>>,
}

impl<T> OrderedIdSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            ids: IndexMap::new(),
        }
    }

    /// Insert an id; returns false when it was already present
    pub fn insert(&mut self, id: EntityId<T>) -> bool {
        if self.ids.contains_key(id.as_str()) {
            return false;
        }
        self.ids.insert(id.as_str().to_string(), id);
        true
    }

    /// Remove an id, keeping the order of the others
    pub fn remove(&mut self, id: &EntityId<T>) -> bool {
        self.ids.shift_remove(id.as_str()).is_some()
    }

    /// True when the raw id value is present
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Number of ids
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when there are no ids
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &EntityId<T>> {
        self.ids.values()
    }

    /// Raw id values in insertion order
    pub fn values(&self) -> Vec<String> {
        self.ids.keys().cloned().collect()
    }

    /// Cloned ids in insertion order
    pub fn to_vec(&self) -> Vec<EntityId<T>> {
        self.ids.values().cloned().collect()
    }
}

impl<T> Default for OrderedIdSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for OrderedIdSet<T> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
        }
    }
}

impl<T> PartialEq for OrderedIdSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ids.len() == other.ids.len() && self.ids.keys().eq(other.ids.keys())
    }
}

impl<T> Eq for OrderedIdSet<T> {}

impl<T> fmt::Debug for OrderedIdSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ids.keys()).finish()
    }
}

impl<T> FromIterator<EntityId<T>> for OrderedIdSet<T> {
    fn from_iter<I: IntoIterator<Item = EntityId<T>>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<T> Extend<EntityId<T>> for OrderedIdSet<T> {
    fn extend<I: IntoIterator<Item = EntityId<T>>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub;
    type StubId = EntityId<Stub>;

    #[test]
    fn test_generated_id_is_valid() {
        let id = StubId::new();
        assert_eq!(id.as_str().len(), HYPHENATED_LEN);
        assert!(StubId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn test_parse_keeps_raw_value() {
        let raw = "9366b7dc-2d71-4799-b91c-c64adb205104";
        let id = StubId::parse(raw).unwrap();
        assert_eq!(id.as_str(), raw);
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_parse_rejects_other_uuid_forms() {
        for raw in [
            "fake id",
            "",
            "9366b7dc2d714799b91cc64adb205104",
            "{9366b7dc-2d71-4799-b91c-c64adb205104}",
            "9366b7dc-2d71-4799-b91c-c64adb20510z",
        ] {
            let err = StubId::parse(raw).unwrap_err();
            assert_eq!(err.value, raw);
        }
    }

    #[test]
    fn test_parse_or_generate() {
        assert!(StubId::parse_or_generate(None).is_ok());
        assert!(StubId::parse_or_generate(Some("nope")).is_err());
    }

    #[test]
    fn test_equality_by_value() {
        let a = StubId::new();
        let b = StubId::parse(a.as_str()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, StubId::new());
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let id = StubId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));

        let back: StubId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<StubId>("\"1\"").is_err());
    }

    #[test]
    fn test_ordered_id_set_preserves_insertion_order_and_dedupes() {
        let first = StubId::new();
        let second = StubId::new();
        let mut set: OrderedIdSet<Stub> =
            vec![second.clone(), first.clone(), second.clone()].into_iter().collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.to_vec(), vec![second.clone(), first.clone()]);
        assert!(!set.insert(first.clone()));

        assert!(set.remove(&second));
        assert!(!set.contains(second.as_str()));
        assert_eq!(set.values(), vec![first.to_string()]);
    }
}
