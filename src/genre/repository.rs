// Copyright 2025 Cowboy AI, LLC.

//! Genre repository

use serde::{Deserialize, Serialize};

use crate::category::CategoryId;
use crate::either::Either;
use crate::errors::SearchValidationError;
use crate::persistence::{
    InMemoryRepository, RepositoryName, Resolvable, SearchInput, SearchParams, SearchResult,
    SearchSpec, SearchableRepository, SortDirection, SortValue, StoreRepository,
};

use super::aggregate::Genre;

/// Structured genre filter; every present field must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreFilter {
    /// Case-insensitive name fragment
    pub name: Option<String>,
    /// Matches genres holding any of these categories
    pub categories_id: Option<Vec<CategoryId>>,
}

/// Raw genre filter with unchecked category ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRawFilter {
    /// Name fragment
    pub name: Option<String>,
    /// Raw category ids
    pub categories_id: Option<Vec<String>>,
}

/// Search parameters of the genre repository
pub type GenreSearchParams = SearchParams<GenreFilter>;

/// Search result of the genre repository
pub type GenreSearchResult = SearchResult<Genre, GenreFilter>;

impl SearchParams<GenreFilter> {
    /// Coerce raw input, reporting every malformed category id
    pub fn create(input: SearchInput<GenreRawFilter>) -> Result<Self, SearchValidationError> {
        let mut error = SearchValidationError::default();
        let input = input.map_filter(|raw| {
            let categories_id = raw.categories_id.filter(|ids| !ids.is_empty()).and_then(|ids| {
                match Either::ok(ids).chain_each(|id| Either::safe(|| CategoryId::parse(id))) {
                    Either::Ok(ids) => Some(ids),
                    Either::Fail(invalid) => {
                        error.set_from_error("categories_id", &invalid);
                        None
                    }
                }
            });
            GenreFilter {
                name: raw.name.filter(|name| !name.is_empty()),
                categories_id,
            }
        });
        if error.errors.is_empty() {
            Ok(SearchParams::new(input))
        } else {
            Err(error)
        }
    }
}

/// Repository of genres
pub trait GenreRepository: SearchableRepository<Genre, GenreFilter> {}

impl<T> GenreRepository for T where T: ?Sized + SearchableRepository<Genre, GenreFilter> {}

impl Resolvable for dyn GenreRepository {
    const NAME: RepositoryName = RepositoryName::Genre;
}

/// Search behavior of the genre repository
pub struct GenreSearch;

impl SearchSpec<Genre> for GenreSearch {
    type Filter = GenreFilter;
    const SORTABLE_FIELDS: &'static [&'static str] = &["name", "created_at"];

    fn matches(filter: &GenreFilter, item: &Genre) -> bool {
        let name_matches = filter.name.as_ref().map_or(true, |name| {
            item.name().to_lowercase().contains(&name.to_lowercase())
        });
        let category_matches = filter.categories_id.as_ref().map_or(true, |ids| {
            ids.iter().any(|id| item.categories_id().contains(id.as_str()))
        });
        name_matches && category_matches
    }

    fn sort_value(item: &Genre, field: &str) -> Option<SortValue> {
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

/// In-memory genre repository
pub type GenreInMemoryRepository = InMemoryRepository<Genre, GenreSearch>;

/// Store-backed genre repository
pub type GenreStoreRepository = StoreRepository<Genre, GenreSearch>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genre::GenreProps;
    use crate::persistence::Repository;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_search_params_report_every_invalid_category_id() {
        let input = SearchInput::new().filter(GenreRawFilter {
            name: None,
            categories_id: Some(vec!["fake".to_string(), "other".to_string()]),
        });
        let err = GenreSearchParams::create(input).unwrap_err();
        assert_eq!(
            err.errors["categories_id"],
            vec![
                "ID fake must be a valid UUID".to_string(),
                "ID other must be a valid UUID".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_filter_by_name_and_category() {
        let movie = CategoryId::new();
        let series = CategoryId::new();
        let repo = GenreInMemoryRepository::new();
        let genres = vec![
            Genre::create(GenreProps::new("Action", vec![movie.clone()])).unwrap(),
            Genre::create(GenreProps::new("Action Series", vec![series.clone()])).unwrap(),
            Genre::create(GenreProps::new("Drama", vec![movie.clone(), series.clone()])).unwrap(),
        ];
        repo.bulk_insert(&genres).await.unwrap();

        let params = GenreSearchParams::create(SearchInput::new().filter(GenreRawFilter {
            name: Some("action".to_string()),
            categories_id: Some(vec![movie.to_string()]),
        }))
        .unwrap();
        let result = repo.search(&params).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].name(), "Action");

        let params = GenreSearchParams::create(SearchInput::new().filter(GenreRawFilter {
            name: None,
            categories_id: Some(vec![series.to_string()]),
        }))
        .unwrap();
        let result = repo.search(&params).await.unwrap();
        assert_eq!(result.total, 2);
    }
}
