// Copyright 2025 Cowboy AI, LLC.

//! Entity types with identity and lifecycle
//!
//! An entity pairs a typed identity with a property record. Properties are
//! never mutated in place: every mutating method builds the candidate next
//! state, validates all of it, and only then replaces the current props.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use crate::errors::DomainResult;
use crate::identifiers::EntityId;

/// A domain object with identity
///
/// # Examples
///
/// ```rust
/// use catalog_domain::{Category, CategoryProps, Entity};
///
/// let category = Category::create(CategoryProps::new("Movie")).unwrap();
/// assert_eq!(category.id(), category.entity_id().as_str());
///
/// let json = category.to_json();
/// assert_eq!(json.name, "Movie");
/// assert!(json.is_active);
/// ```
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Name used in error messages and as the storage table name
    const NAME: &'static str;

    /// The property record of this entity
    type Props;

    /// Explicit wire shape: `{id, ...fields}` with native date values
    type Json: Serialize + DeserializeOwned + Debug + Send + Sync;

    /// Typed identity
    fn entity_id(&self) -> &EntityId<Self>;

    /// Current property record
    fn props(&self) -> &Self::Props;

    /// Raw identity value
    fn id(&self) -> &str {
        self.entity_id().as_str()
    }

    /// Serialize to the explicit wire shape
    fn to_json(&self) -> Self::Json;
}

/// Entity that is the consistency boundary for a cluster of data
///
/// References to other aggregates are held by identity only.
pub trait AggregateRoot: Entity {}

/// Entity that can be restored from its wire shape
///
/// Restoring re-runs the same validation as creation, so a stored row that no
/// longer satisfies the rules is rejected instead of loaded half-valid.
pub trait PersistentEntity: Entity {
    /// Rebuild the entity from its wire shape
    fn from_json(json: Self::Json) -> DomainResult<Self>;
}
