// Copyright 2025 Cowboy AI, LLC.

//! # Persistence Layer
//!
//! Storage-agnostic repositories and transaction coordination for the
//! catalog aggregates.
//!
//! ## Components
//!
//! - **Repository contract**: CRUD plus existence partitioning, with a
//!   searchable extension (filter, sort, paginate)
//! - **In-memory repository**: insertion ordered, no rollback
//! - **Store repository**: JSON rows in a transactional [`Store`]
//! - **Unit-of-Work**: one transaction lifecycle, typed repository resolution
//!   through a [`RepositoryContainer`]

pub mod in_memory;
pub mod query_support;
pub mod registry;
pub mod repository;
pub mod search;
pub mod store;
pub mod store_repository;
pub mod unit_of_work;

pub use in_memory::InMemoryRepository;
pub use query_support::{
    SearchInput, SearchParams, SearchResult, SortDirection, DEFAULT_PAGE, DEFAULT_PER_PAGE,
};
pub use registry::{
    downcast_repository, InMemoryCatalog, RepositoryContainer, RepositoryName, Resolvable,
};
pub use repository::{IdPartition, Repository, SearchableRepository};
pub use search::{search_items, SearchSpec, SortValue};
pub use store::{Store, StoreConfig, Table, Transaction, TransactionSlot};
pub use store_repository::{EntityRowMapper, StoreRepository};
pub use unit_of_work::{InMemoryUnitOfWork, StoreUnitOfWork, UnitOfWork};
