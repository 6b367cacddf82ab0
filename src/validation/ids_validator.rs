// Copyright 2025 Cowboy AI, LLC.

//! Cross-aggregate identifier validation
//!
//! Validates a list of raw foreign ids in two batches:
//!
//! ```mermaid
//! graph LR
//!     A[raw ids] -->|falsy?| F1[fail: invalid id]
//!     A -->|chain_each parse| B{format errors?}
//!     B -->|yes| F2[fail: every invalid id]
//!     B -->|no| C[exists_by_id]
//!     C -->|missing| F3[fail: one NotFound per id]
//!     C -->|all present| OK[ok: typed ids]
//! ```
//!
//! Format failures short-circuit the existence check for the whole batch.

use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

use crate::either::Either;
use crate::entity::Entity;
use crate::errors::{DomainError, DomainResult, InvalidIdentifierError, NotFoundError};
use crate::identifiers::EntityId;
use crate::persistence::Repository;

/// Raw identifier input as received from outside the domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawIds {
    /// No value was supplied
    Missing,
    /// A single value
    One(String),
    /// A list of values
    Many(Vec<String>),
}

impl From<&str> for RawIds {
    fn from(value: &str) -> Self {
        RawIds::One(value.to_string())
    }
}

impl From<String> for RawIds {
    fn from(value: String) -> Self {
        RawIds::One(value)
    }
}

impl From<Vec<String>> for RawIds {
    fn from(values: Vec<String>) -> Self {
        RawIds::Many(values)
    }
}

impl From<Vec<&str>> for RawIds {
    fn from(values: Vec<&str>) -> Self {
        RawIds::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[String]> for RawIds {
    fn from(values: &[String]) -> Self {
        RawIds::Many(values.to_vec())
    }
}

impl<T: Into<RawIds>> From<Option<T>> for RawIds {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawIds::Missing, Into::into)
    }
}

/// Validation outcome: typed ids in input order, or every failure
pub type IdsValidation<E> = Either<Vec<EntityId<E>>, Vec<DomainError>>;

/// Validates that raw ids are well formed and exist in a repository
///
/// Repository failures (storage errors) are returned as `Err`; validation
/// failures are returned as `Ok(Either::Fail(..))`.
pub struct AggregateIdsValidator<E, R: ?Sized> {
    repository: Arc<R>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> AggregateIdsValidator<E, R>
where
    E: Entity,
    R: ?Sized + Repository<E>,
{
    /// Create a validator checking existence against `repository`
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            _entity: PhantomData,
        }
    }

    /// Validate raw ids
    pub async fn validate(&self, raw: impl Into<RawIds>) -> DomainResult<IdsValidation<E>> {
        let parsed = Either::ok(raw.into())
            .chain(|raw| match raw {
                RawIds::Missing => Either::fail(vec![InvalidIdentifierError::new("null")]),
                RawIds::One(value) if value.is_empty() => {
                    Either::fail(vec![InvalidIdentifierError::new(value)])
                }
                RawIds::One(value) => Either::ok(vec![value]),
                RawIds::Many(values) => Either::ok(values),
            })
            .chain_each(|value| Either::safe(|| EntityId::<E>::parse(value)));

        let ids = match parsed {
            Either::Ok(ids) => ids,
            Either::Fail(errors) => {
                debug!(entity = E::NAME, invalid = errors.len(), "malformed ids");
                return Ok(Either::fail(errors.into_iter().map(Into::into).collect()));
            }
        };

        let partition = self.repository.exists_by_id(&ids).await?;
        if partition.not_exists.is_empty() {
            return Ok(Either::ok(ids));
        }

        debug!(entity = E::NAME, missing = partition.not_exists.len(), "ids not found");
        Ok(Either::fail(
            partition
                .not_exists
                .into_iter()
                .map(|id| NotFoundError::new(id.into_string(), E::NAME).into())
                .collect(),
        ))
    }
}
