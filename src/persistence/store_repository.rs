// Copyright 2025 Cowboy AI, LLC.

//! Store-backed repository
//!
//! Entities are mapped to rows through their wire shape. Each call picks up
//! the transaction currently held by the repository's [`TransactionSlot`]; an
//! empty slot means auto-commit.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::entity::{Entity, PersistentEntity};
use crate::errors::{DomainError, DomainResult, LoadEntityError, NotFoundError};
use crate::identifiers::EntityId;

use super::query_support::{SearchParams, SearchResult};
use super::repository::{ensure_ids_given, IdPartition, Repository, SearchableRepository};
use super::search::{search_items, SearchSpec};
use super::store::{Store, Table, TransactionSlot};

/// Maps entities to store rows and back
pub struct EntityRowMapper;

impl EntityRowMapper {
    /// Entity to row
    pub fn to_row<E: Entity>(entity: &E) -> DomainResult<Value> {
        Ok(serde_json::to_value(entity.to_json())?)
    }

    /// Row to entity, failing with `LoadEntity` when the row no longer validates
    pub fn to_entity<E: PersistentEntity>(row: &Value) -> DomainResult<E> {
        let json: E::Json = serde_json::from_value(row.clone())?;
        E::from_json(json).map_err(|err| match err {
            DomainError::EntityValidation(validation) => {
                LoadEntityError::new(validation.errors).into()
            }
            other => other,
        })
    }
}

/// Repository of `E` over a [`Store`], searchable when `S` is a [`SearchSpec`]
pub struct StoreRepository<E, S = ()> {
    store: Arc<Store>,
    slot: TransactionSlot,
    _marker: PhantomData<fn() -> (E, S)>,
}

impl<E: Entity, S> StoreRepository<E, S> {
    /// Repository bound to `slot`
    pub fn new(store: Arc<Store>, slot: TransactionSlot) -> Self {
        Self {
            store,
            slot,
            _marker: PhantomData,
        }
    }

    /// Repository with its own, always empty, slot (auto-commit only)
    pub fn unbound(store: Arc<Store>) -> Self {
        Self::new(store, TransactionSlot::new())
    }

    async fn read<T>(&self, f: impl FnOnce(&Table) -> T) -> DomainResult<T> {
        let tx = self.slot.current().await;
        self.store.read(tx.as_ref(), E::NAME, f).await
    }

    async fn write<T>(&self, f: impl FnOnce(&mut Table) -> DomainResult<T>) -> DomainResult<T> {
        let tx = self.slot.current().await;
        self.store.write(tx.as_ref(), E::NAME, f).await
    }
}

fn insert_unique(table: &mut Table, name: &str, id: &str, row: Value) -> DomainResult<()> {
    if table.contains_key(id) {
        return Err(DomainError::Storage(format!(
            "duplicate key value violates unique constraint \"{name}.id\": {id}"
        )));
    }
    table.insert(id.to_string(), row);
    Ok(())
}

#[async_trait]
impl<E, S> Repository<E> for StoreRepository<E, S>
where
    E: PersistentEntity,
    S: Send + Sync + 'static,
{
    async fn insert(&self, entity: &E) -> DomainResult<()> {
        let row = EntityRowMapper::to_row(entity)?;
        let id = entity.id().to_string();
        self.write(|table| insert_unique(table, E::NAME, &id, row))
            .await
    }

    async fn bulk_insert(&self, entities: &[E]) -> DomainResult<()> {
        let rows = entities
            .iter()
            .map(|entity| Ok((entity.id().to_string(), EntityRowMapper::to_row(entity)?)))
            .collect::<DomainResult<Vec<_>>>()?;
        self.write(|table| {
            rows.into_iter()
                .try_for_each(|(id, row)| insert_unique(table, E::NAME, &id, row))
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<E> {
        let row = self.read(|table| table.get(id).cloned()).await?;
        match row {
            Some(row) => EntityRowMapper::to_entity(&row),
            None => Err(NotFoundError::new(id, E::NAME).into()),
        }
    }

    async fn find_by_ids(&self, ids: &[EntityId<E>]) -> DomainResult<Vec<E>> {
        let wanted: HashSet<&str> = ids.iter().map(EntityId::as_str).collect();
        let rows: Vec<Value> = self
            .read(|table| {
                table
                    .iter()
                    .filter(|(id, _)| wanted.contains(id.as_str()))
                    .map(|(_, row)| row.clone())
                    .collect()
            })
            .await?;
        rows.iter().map(EntityRowMapper::to_entity).collect()
    }

    async fn find_all(&self) -> DomainResult<Vec<E>> {
        let rows: Vec<Value> = self.read(|table| table.values().cloned().collect()).await?;
        rows.iter().map(EntityRowMapper::to_entity).collect()
    }

    async fn update(&self, entity: &E) -> DomainResult<()> {
        let row = EntityRowMapper::to_row(entity)?;
        let id = entity.id().to_string();
        self.write(|table| match table.get_mut(&id) {
            Some(stored) => {
                *stored = row;
                Ok(())
            }
            None => Err(NotFoundError::new(id.as_str(), E::NAME).into()),
        })
        .await
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.write(|table| match table.shift_remove(id) {
            Some(_) => Ok(()),
            None => Err(NotFoundError::new(id, E::NAME).into()),
        })
        .await
    }

    async fn exists_by_id(&self, ids: &[EntityId<E>]) -> DomainResult<IdPartition<E>> {
        ensure_ids_given(ids)?;
        self.read(|table| IdPartition::split(ids, |id| table.contains_key(id)))
            .await
    }
}

#[async_trait]
impl<E, S> SearchableRepository<E, S::Filter> for StoreRepository<E, S>
where
    E: PersistentEntity,
    S: SearchSpec<E>,
{
    fn sortable_fields(&self) -> &'static [&'static str] {
        S::SORTABLE_FIELDS
    }

    async fn search(
        &self,
        params: &SearchParams<S::Filter>,
    ) -> DomainResult<SearchResult<E, S::Filter>> {
        let items = self.find_all().await?;
        Ok(search_items::<E, S>(items, params))
    }
}
