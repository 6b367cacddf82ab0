// Copyright 2025 Cowboy AI, LLC.

//! # Catalog Domain
//!
//! Persistence seedwork for a video catalog: aggregates referencing each
//! other by id, repositories that behave the same in memory and over a
//! transactional store, a Unit-of-Work owning the transaction boundary, and
//! an [`Either`] primitive that accumulates validation failures.
//!
//! ## Layers
//!
//! ```mermaid
//! graph TD
//!     E[Either] --> I[EntityId / Entity]
//!     I --> R[Repository contract]
//!     R --> S[Search params and results]
//!     S --> U[Unit-of-Work]
//!     U --> V[Cross-aggregate id validator]
//!     V --> G[Genre use cases]
//! ```
//!
//! ## Design Principles
//!
//! 1. **Relations by id**: aggregates hold [`EntityId`]s of other aggregates,
//!    never the aggregates themselves
//! 2. **Whole-state validation**: every mutation re-validates the complete
//!    next state before replacing the props
//! 3. **One contract, two backends**: in-memory and store repositories share
//!    the same search pipeline
//! 4. **Explicit outcomes**: expected validation failures are values
//!    ([`Either`], `Result`), never panics

#![warn(missing_docs)]

mod either;
mod entity;
mod errors;
mod identifiers;
mod state_machine;
mod transaction_state;

pub mod cast_member;
pub mod category;
pub mod genre;
pub mod persistence;
pub mod validation;
pub mod video;

pub use either::Either;
pub use entity::{AggregateRoot, Entity, PersistentEntity};
pub use errors::{
    DomainError, DomainResult, EntityValidationError, FieldsErrors, InvalidArgumentError,
    InvalidIdentifierError, LoadEntityError, NotFoundError, SearchValidationError,
};
pub use identifiers::{EntityId, OrderedIdSet};
pub use state_machine::{MealyStateTransitions, State, TransitionInput, TransitionOutput};
pub use transaction_state::{UnitOfWorkAction, UnitOfWorkInput, UnitOfWorkState};
pub use validation::AggregateIdsValidator;

pub use cast_member::{CastMember, CastMemberId, CastMemberProps, CastMemberType};
pub use category::{CategoriesIdsValidator, Category, CategoryId, CategoryProps};
pub use genre::{Genre, GenreId, GenreProps};
pub use video::{Video, VideoId};

pub use persistence::{
    InMemoryCatalog, InMemoryRepository, InMemoryUnitOfWork, Repository, RepositoryContainer,
    RepositoryName, SearchInput, SearchParams, SearchResult, SearchableRepository, SortDirection,
    Store, StoreConfig, StoreRepository, StoreUnitOfWork, UnitOfWork,
};
