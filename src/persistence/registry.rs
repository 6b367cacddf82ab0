// Copyright 2025 Cowboy AI, LLC.

//! Typed repository registry
//!
//! Repositories are registered per [`RepositoryName`] as factories that bind
//! a new repository instance to the caller's [`TransactionSlot`]. Resolution
//! is typed: `resolve::<dyn GenreRepository>()` returns an
//! `Arc<dyn GenreRepository>`.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::cast_member::{
    CastMemberInMemoryRepository, CastMemberRepository, CastMemberStoreRepository,
};
use crate::category::{CategoryInMemoryRepository, CategoryRepository, CategoryStoreRepository};
use crate::errors::{DomainError, DomainResult, InvalidArgumentError};
use crate::genre::{GenreInMemoryRepository, GenreRepository, GenreStoreRepository};
use crate::video::{VideoInMemoryRepository, VideoRepository, VideoStoreRepository};

use super::store::{Store, TransactionSlot};

/// Names of the repositories a Unit-of-Work can hand out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepositoryName {
    /// Category repository
    Category,
    /// Genre repository
    Genre,
    /// Cast member repository
    CastMember,
    /// Video repository
    Video,
}

impl RepositoryName {
    /// Every known name
    pub const ALL: [RepositoryName; 4] = [
        RepositoryName::Category,
        RepositoryName::Genre,
        RepositoryName::CastMember,
        RepositoryName::Video,
    ];

    /// Registry key, e.g. `CategoryRepository`
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryName::Category => "CategoryRepository",
            RepositoryName::Genre => "GenreRepository",
            RepositoryName::CastMember => "CastMemberRepository",
            RepositoryName::Video => "VideoRepository",
        }
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepositoryName {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| InvalidArgumentError(format!("Repository {s} not found")))
    }
}

/// A repository interface that can be resolved from the registry
///
/// Implemented on the `dyn` repository traits of each aggregate.
pub trait Resolvable: Send + Sync + 'static {
    /// Registry key of the interface
    const NAME: RepositoryName;
}

type Factory = Box<dyn Fn(&TransactionSlot) -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// Registry of repository factories
#[derive(Default)]
pub struct RepositoryContainer {
    factories: HashMap<RepositoryName, Factory>,
}

impl RepositoryContainer {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the factory of `R`, replacing any previous one
    pub fn register<R, F>(&mut self, factory: F) -> &mut Self
    where
        R: ?Sized + Resolvable,
        F: Fn(&TransactionSlot) -> Arc<R> + Send + Sync + 'static,
    {
        self.factories.insert(
            R::NAME,
            Box::new(move |slot: &TransactionSlot| {
                Box::new(factory(slot)) as Box<dyn Any + Send + Sync>
            }),
        );
        self
    }

    /// True when a factory is registered for `name`
    pub fn contains(&self, name: RepositoryName) -> bool {
        self.factories.contains_key(&name)
    }

    /// Build the repository registered under `name`, bound to `slot`
    pub fn resolve_any(
        &self,
        name: RepositoryName,
        slot: &TransactionSlot,
    ) -> DomainResult<Box<dyn Any + Send + Sync>> {
        let factory = self
            .factories
            .get(&name)
            .ok_or(DomainError::RepositoryNotFound(name))?;
        Ok(factory(slot))
    }

    /// Build `R` bound to `slot`
    pub fn resolve<R: ?Sized + Resolvable>(&self, slot: &TransactionSlot) -> DomainResult<Arc<R>> {
        downcast_repository(self.resolve_any(R::NAME, slot)?)
    }
}

impl RepositoryContainer {
    /// Every catalog repository over `store`, bound to the caller's slot
    pub fn for_store(store: Arc<Store>) -> Self {
        let mut container = Self::new();
        let categories = store.clone();
        container.register::<dyn CategoryRepository, _>(move |slot: &TransactionSlot| {
            Arc::new(CategoryStoreRepository::new(categories.clone(), slot.clone()))
                as Arc<dyn CategoryRepository>
        });
        let genres = store.clone();
        container.register::<dyn GenreRepository, _>(move |slot: &TransactionSlot| {
            Arc::new(GenreStoreRepository::new(genres.clone(), slot.clone()))
                as Arc<dyn GenreRepository>
        });
        let cast_members = store.clone();
        container.register::<dyn CastMemberRepository, _>(move |slot: &TransactionSlot| {
            Arc::new(CastMemberStoreRepository::new(cast_members.clone(), slot.clone()))
                as Arc<dyn CastMemberRepository>
        });
        container.register::<dyn VideoRepository, _>(move |slot: &TransactionSlot| {
            Arc::new(VideoStoreRepository::new(store.clone(), slot.clone()))
                as Arc<dyn VideoRepository>
        });
        container
    }

    /// Every catalog repository handing out the shared in-memory instances
    pub fn for_in_memory(catalog: &InMemoryCatalog) -> Self {
        let mut container = Self::new();
        let categories = catalog.categories.clone();
        container.register::<dyn CategoryRepository, _>(move |_: &TransactionSlot| {
            categories.clone() as Arc<dyn CategoryRepository>
        });
        let genres = catalog.genres.clone();
        container.register::<dyn GenreRepository, _>(move |_: &TransactionSlot| {
            genres.clone() as Arc<dyn GenreRepository>
        });
        let cast_members = catalog.cast_members.clone();
        container.register::<dyn CastMemberRepository, _>(move |_: &TransactionSlot| {
            cast_members.clone() as Arc<dyn CastMemberRepository>
        });
        let videos = catalog.videos.clone();
        container.register::<dyn VideoRepository, _>(move |_: &TransactionSlot| {
            videos.clone() as Arc<dyn VideoRepository>
        });
        container
    }
}

/// Shared in-memory repositories of the catalog
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    /// Categories
    pub categories: Arc<CategoryInMemoryRepository>,
    /// Genres
    pub genres: Arc<GenreInMemoryRepository>,
    /// Cast members
    pub cast_members: Arc<CastMemberInMemoryRepository>,
    /// Videos
    pub videos: Arc<VideoInMemoryRepository>,
}

/// Recover the typed repository from a resolved instance
pub fn downcast_repository<R: ?Sized + Resolvable>(
    resolved: Box<dyn Any + Send + Sync>,
) -> DomainResult<Arc<R>> {
    resolved
        .downcast::<Arc<R>>()
        .map(|repository| *repository)
        .map_err(|_| DomainError::RepositoryNotFound(R::NAME))
}

impl fmt::Debug for RepositoryContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}
