// Copyright 2025 Cowboy AI, LLC.

//! Category repository

use crate::persistence::{
    InMemoryRepository, RepositoryName, Resolvable, SearchParams, SearchResult, SearchSpec,
    SearchableRepository, SortDirection, SortValue, StoreRepository,
};

use super::aggregate::Category;

/// Free-text filter on the category name (case-insensitive contains)
pub type CategoryFilter = String;

/// Search parameters of the category repository
pub type CategorySearchParams = SearchParams<CategoryFilter>;

/// Search result of the category repository
pub type CategorySearchResult = SearchResult<Category, CategoryFilter>;

/// Repository of categories
pub trait CategoryRepository: SearchableRepository<Category, CategoryFilter> {}

impl<T> CategoryRepository for T where T: ?Sized + SearchableRepository<Category, CategoryFilter> {}

impl Resolvable for dyn CategoryRepository {
    const NAME: RepositoryName = RepositoryName::Category;
}

/// Search behavior of the category repository
pub struct CategorySearch;

impl SearchSpec<Category> for CategorySearch {
    type Filter = CategoryFilter;
    const SORTABLE_FIELDS: &'static [&'static str] = &["name", "created_at"];

    fn matches(filter: &CategoryFilter, item: &Category) -> bool {
        item.name().to_lowercase().contains(&filter.to_lowercase())
    }

    fn sort_value(item: &Category, field: &str) -> Option<SortValue> {
        match field {
            "name" => Some(SortValue::Text(item.name().to_string())),
            "created_at" => Some(SortValue::Timestamp(item.created_at())),
            _ => None,
        }
    }

    fn default_sort() -> Option<(&'static str, SortDirection)> {
        Some(("created_at", SortDirection::Desc))
    }
}

/// In-memory category repository
pub type CategoryInMemoryRepository = InMemoryRepository<Category, CategorySearch>;

/// Store-backed category repository
pub type CategoryStoreRepository = StoreRepository<Category, CategorySearch>;
