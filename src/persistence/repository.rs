// Copyright 2025 Cowboy AI, LLC.

//! Repository contracts
//!
//! Both the in-memory and the store-backed repositories implement these
//! traits with identical observable behavior.

use async_trait::async_trait;
use indexmap::IndexSet;

use crate::entity::Entity;
use crate::errors::{DomainResult, InvalidArgumentError};
use crate::identifiers::EntityId;

use super::query_support::{SearchParams, SearchResult};

/// Result of [`Repository::exists_by_id`]: the input ids split by existence
///
/// Each side keeps first-seen input order and holds no duplicates.
#[derive(Debug, Clone)]
pub struct IdPartition<E> {
    /// Ids that are stored
    pub exists: Vec<EntityId<E>>,
    /// Ids that are not stored
    pub not_exists: Vec<EntityId<E>>,
}

impl<E> IdPartition<E> {
    /// Partition `ids` with the `stored` predicate
    pub fn split(ids: &[EntityId<E>], stored: impl Fn(&str) -> bool) -> Self {
        let unique: IndexSet<&EntityId<E>> = ids.iter().collect();
        let (exists, not_exists) = unique
            .into_iter()
            .cloned()
            .partition(|id| stored(id.as_str()));
        Self { exists, not_exists }
    }

    /// Destructure into `(exists, not_exists)`
    pub fn into_parts(self) -> (Vec<EntityId<E>>, Vec<EntityId<E>>) {
        (self.exists, self.not_exists)
    }
}

/// Fail with `InvalidArgument` when asked about no ids at all
pub(crate) fn ensure_ids_given<E>(ids: &[EntityId<E>]) -> DomainResult<()> {
    if ids.is_empty() {
        return Err(InvalidArgumentError(
            "ids must be an array with at least one element".to_string(),
        )
        .into());
    }
    Ok(())
}

/// CRUD repository of one entity type
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Store a new entity
    async fn insert(&self, entity: &E) -> DomainResult<()>;

    /// Store several new entities
    async fn bulk_insert(&self, entities: &[E]) -> DomainResult<()>;

    /// Load an entity, failing with `NotFound` when absent
    async fn find_by_id(&self, id: &str) -> DomainResult<E>;

    /// Load the stored entities among `ids`, silently skipping unknown ids
    async fn find_by_ids(&self, ids: &[EntityId<E>]) -> DomainResult<Vec<E>>;

    /// Load every stored entity
    async fn find_all(&self) -> DomainResult<Vec<E>>;

    /// Replace a stored entity, failing with `NotFound` when absent
    async fn update(&self, entity: &E) -> DomainResult<()>;

    /// Remove a stored entity, failing with `NotFound` when absent
    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Split `ids` into stored and unknown ids
    ///
    /// Fails with `InvalidArgument` when `ids` is empty.
    async fn exists_by_id(&self, ids: &[EntityId<E>]) -> DomainResult<IdPartition<E>>;
}

/// Repository with filter, sort and paginate support
#[async_trait]
pub trait SearchableRepository<E: Entity, F: Send + Sync>: Repository<E> {
    /// Properties accepted as a sort key
    fn sortable_fields(&self) -> &'static [&'static str];

    /// Filter, then sort, then paginate
    async fn search(&self, params: &SearchParams<F>) -> DomainResult<SearchResult<E, F>>;
}
