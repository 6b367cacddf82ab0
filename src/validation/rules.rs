// Copyright 2025 Cowboy AI, LLC.

//! Field validation rules

use crate::errors::{EntityValidationError, FieldsErrors};

/// Default maximum length of short text fields
pub const MAX_TEXT_LENGTH: usize = 255;

/// Validator collaborator of an entity
///
/// `validate` returns false when the props break a rule; the messages are
/// then available from `errors`, grouped by field.
pub trait ValidatorFields<P> {
    /// Validate the full property record
    fn validate(&mut self, props: &P) -> bool;

    /// Failures of the last `validate` call
    fn errors(&self) -> &FieldsErrors;
}

/// Run a fresh validator over `props`
pub fn validate_props<P, V>(props: &P) -> Result<(), EntityValidationError>
where
    V: ValidatorFields<P> + Default,
{
    let mut validator = V::default();
    if validator.validate(props) {
        Ok(())
    } else {
        Err(EntityValidationError::new(validator.errors().clone()))
    }
}

/// Chain of rules for a single field
///
/// The chain stops at the first failing rule, so a field reports at most one
/// message per validation run.
///
/// # Examples
///
/// ```rust
/// use catalog_domain::validation::FieldRules;
/// use catalog_domain::FieldsErrors;
///
/// let mut errors = FieldsErrors::new();
/// FieldRules::new(&mut errors, "name").required("").max_length("", 255);
/// assert_eq!(errors["name"], vec!["name should not be empty".to_string()]);
/// ```
pub struct FieldRules<'e> {
    errors: &'e mut FieldsErrors,
    field: &'e str,
    failed: bool,
}

impl<'e> FieldRules<'e> {
    /// Start a rule chain for `field`
    pub fn new(errors: &'e mut FieldsErrors, field: &'e str) -> Self {
        Self {
            errors,
            field,
            failed: false,
        }
    }

    /// Text must not be empty
    pub fn required(self, value: &str) -> Self {
        let message = format!("{} should not be empty", self.field);
        self.rule(!value.is_empty(), message)
    }

    /// Text must be at most `max` characters
    pub fn max_length(self, value: &str, max: usize) -> Self {
        let message = format!(
            "{} must be shorter than or equal to {max} characters",
            self.field
        );
        self.rule(value.chars().count() <= max, message)
    }

    /// Collection must hold at least one element
    pub fn not_empty(self, len: usize) -> Self {
        let message = format!("{} should not be empty", self.field);
        self.rule(len > 0, message)
    }

    /// Arbitrary predicate with its own message
    pub fn rule(mut self, valid: bool, message: impl Into<String>) -> Self {
        if !self.failed && !valid {
            self.failed = true;
            self.errors
                .entry(self.field.to_string())
                .or_default()
                .push(message.into());
        }
        self
    }

    /// True while no rule in the chain has failed
    pub fn is_valid(&self) -> bool {
        !self.failed
    }
}
