// Copyright 2025 Cowboy AI, LLC.

//! Validation building blocks
//!
//! - [`FieldRules`] / [`ValidatorFields`]: per-field rules used by entity
//!   validators
//! - [`AggregateIdsValidator`]: format and existence check of foreign ids

mod ids_validator;
mod rules;

pub use ids_validator::{AggregateIdsValidator, IdsValidation, RawIds};
pub use rules::{validate_props, FieldRules, ValidatorFields, MAX_TEXT_LENGTH};
