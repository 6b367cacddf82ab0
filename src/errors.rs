// Copyright 2025 Cowboy AI, LLC.

//! Error types for domain and persistence operations

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::persistence::RepositoryName;

/// Field name to ordered list of human-readable messages
pub type FieldsErrors = IndexMap<String, Vec<String>>;

/// A raw identifier that is not a valid UUID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ID {value} must be a valid UUID")]
pub struct InvalidIdentifierError {
    /// The offending raw value
    pub value: String,
}

impl InvalidIdentifierError {
    /// Create an error for the given raw value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A repository operation targeted ids that do not exist
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} Not Found using ID ({})", .ids.join(", "))]
pub struct NotFoundError {
    /// Name of the entity type that was searched
    pub entity: &'static str,
    /// The ids that were not found
    pub ids: Vec<String>,
}

impl NotFoundError {
    /// Not found error for a single id
    pub fn new(id: impl Into<String>, entity: &'static str) -> Self {
        Self {
            entity,
            ids: vec![id.into()],
        }
    }

    /// Not found error for several ids at once
    pub fn many<I, S>(ids: I, entity: &'static str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entity,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Precondition violation on the shape of a call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidArgumentError(pub String);

/// Per-field validation failures of an entity
///
/// Further failures can be folded in after construction with
/// [`EntityValidationError::set_from_error`], which is how identifier checks
/// made by another subsystem end up in the same error as local field rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Entity Validation Error")]
pub struct EntityValidationError {
    /// Messages grouped by field
    pub errors: FieldsErrors,
}

impl EntityValidationError {
    /// Create from a field error map
    pub fn new(errors: FieldsErrors) -> Self {
        Self { errors }
    }

    /// Append the messages of `errors` under `field`
    pub fn set_from_error<E: fmt::Display>(&mut self, field: &str, errors: &[E]) {
        append_messages(&mut self.errors, field, errors);
    }

    /// Append a single message under `field`
    pub fn add_message(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Number of fields with at least one message
    pub fn count(&self) -> usize {
        self.errors.len()
    }
}

/// Raised when search input cannot be turned into search parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("Search Validation Error")]
pub struct SearchValidationError {
    /// Messages grouped by field
    pub errors: FieldsErrors,
}

impl SearchValidationError {
    /// Append the messages of `errors` under `field`
    pub fn set_from_error<E: fmt::Display>(&mut self, field: &str, errors: &[E]) {
        append_messages(&mut self.errors, field, errors);
    }
}

/// A stored row could not be turned back into a valid entity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} {errors:?}")]
pub struct LoadEntityError {
    /// Why loading failed
    pub message: String,
    /// Field failures reported by the entity validator
    pub errors: FieldsErrors,
}

impl LoadEntityError {
    /// Create with the default message
    pub fn new(errors: FieldsErrors) -> Self {
        Self {
            message: "An entity could not be loaded".to_string(),
            errors,
        }
    }
}

fn append_messages<E: fmt::Display>(target: &mut FieldsErrors, field: &str, errors: &[E]) {
    if errors.is_empty() {
        return;
    }
    target
        .entry(field.to_string())
        .or_default()
        .extend(errors.iter().map(ToString::to_string));
}

/// Errors that can occur in domain and persistence operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed identity string
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifierError),

    /// Repository operation targeting a nonexistent row
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Precondition violation on call shape
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    /// Field validation failures of an entity
    #[error(transparent)]
    EntityValidation(#[from] EntityValidationError),

    /// Invalid search input
    #[error(transparent)]
    SearchValidation(#[from] SearchValidationError),

    /// Stored row failed to map back to an entity
    #[error(transparent)]
    LoadEntity(#[from] LoadEntityError),

    /// Commit, rollback or repository lookup without an active transaction
    #[error("No transaction started")]
    NoTransaction,

    /// The repository name is not registered
    #[error("Repository {0} not found")]
    RepositoryNotFound(RepositoryName),

    /// The transaction was already committed or rolled back
    #[error("Transaction {0} is already finished")]
    TransactionClosed(u64),

    /// Backing store failure (constraint violation, I/O)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl DomainError {
    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::EntityValidation(_)
                | DomainError::SearchValidation(_)
                | DomainError::InvalidIdentifier(_)
        )
    }
}
