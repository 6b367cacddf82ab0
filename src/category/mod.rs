// Copyright 2025 Cowboy AI, LLC.

//! Category aggregate and its repository

mod aggregate;
mod repository;

pub use aggregate::{Category, CategoryId, CategoryJson, CategoryProps, CategoryValidator};
pub use repository::{
    CategoryFilter, CategoryInMemoryRepository, CategoryRepository, CategorySearch,
    CategorySearchParams, CategorySearchResult, CategoryStoreRepository,
};

use crate::validation::AggregateIdsValidator;

/// Validates foreign category ids held by other aggregates
pub type CategoriesIdsValidator<R = dyn CategoryRepository> = AggregateIdsValidator<Category, R>;
