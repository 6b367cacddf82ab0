// Copyright 2025 Cowboy AI, LLC.

//! In-memory repository
//!
//! Items live in insertion order behind an async lock. There is no rollback
//! at this layer: a failing `bulk_insert` or a sequence of `update`/`delete`
//! calls interrupted halfway leaves whatever was already applied. Callers
//! needing atomicity go through a store-backed Unit-of-Work.

use async_trait::async_trait;
use std::collections::HashSet;
use std::marker::PhantomData;
use tokio::sync::RwLock;
use tracing::debug;

use crate::entity::Entity;
use crate::errors::{DomainResult, NotFoundError};
use crate::identifiers::EntityId;

use super::query_support::{SearchParams, SearchResult};
use super::repository::{ensure_ids_given, IdPartition, Repository, SearchableRepository};
use super::search::{search_items, SearchSpec};

/// In-memory repository of `E`, searchable when `S` is a [`SearchSpec`]
pub struct InMemoryRepository<E, S = ()> {
    items: RwLock<Vec<E>>,
    _search: PhantomData<fn() -> S>,
}

impl<E: Entity, S> Default for InMemoryRepository<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity, S> InMemoryRepository<E, S> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Create a repository holding `items`
    pub fn with_items(items: Vec<E>) -> Self {
        Self {
            items: RwLock::new(items),
            _search: PhantomData,
        }
    }

    /// Snapshot of the stored items in insertion order
    pub async fn items(&self) -> Vec<E> {
        self.items.read().await.clone()
    }
}

#[async_trait]
impl<E, S> Repository<E> for InMemoryRepository<E, S>
where
    E: Entity,
    S: Send + Sync + 'static,
{
    async fn insert(&self, entity: &E) -> DomainResult<()> {
        self.items.write().await.push(entity.clone());
        Ok(())
    }

    async fn bulk_insert(&self, entities: &[E]) -> DomainResult<()> {
        self.items.write().await.extend_from_slice(entities);
        debug!(entity = E::NAME, count = entities.len(), "bulk insert");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<E> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or_else(|| NotFoundError::new(id, E::NAME).into())
    }

    async fn find_by_ids(&self, ids: &[EntityId<E>]) -> DomainResult<Vec<E>> {
        let wanted: HashSet<&str> = ids.iter().map(EntityId::as_str).collect();
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|item| wanted.contains(item.id()))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<E>> {
        Ok(self.items.read().await.clone())
    }

    async fn update(&self, entity: &E) -> DomainResult<()> {
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|item| item.id() == entity.id())
            .ok_or_else(|| NotFoundError::new(entity.id(), E::NAME))?;
        *slot = entity.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| NotFoundError::new(id, E::NAME))?;
        items.remove(index);
        Ok(())
    }

    async fn exists_by_id(&self, ids: &[EntityId<E>]) -> DomainResult<IdPartition<E>> {
        ensure_ids_given(ids)?;
        let items = self.items.read().await;
        let stored: HashSet<&str> = items.iter().map(|item| item.id()).collect();
        Ok(IdPartition::split(ids, |id| stored.contains(id)))
    }
}

#[async_trait]
impl<E, S> SearchableRepository<E, S::Filter> for InMemoryRepository<E, S>
where
    E: Entity,
    S: SearchSpec<E>,
{
    fn sortable_fields(&self) -> &'static [&'static str] {
        S::SORTABLE_FIELDS
    }

    async fn search(
        &self,
        params: &SearchParams<S::Filter>,
    ) -> DomainResult<SearchResult<E, S::Filter>> {
        let items = self.items.read().await.clone();
        Ok(search_items::<E, S>(items, params))
    }
}
