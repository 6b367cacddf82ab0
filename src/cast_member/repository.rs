// Copyright 2025 Cowboy AI, LLC.

//! Cast member repository

use serde::{Deserialize, Serialize};

use crate::either::Either;
use crate::errors::SearchValidationError;
use crate::persistence::{
    InMemoryRepository, RepositoryName, Resolvable, SearchInput, SearchParams, SearchResult,
    SearchSpec, SearchableRepository, SortDirection, SortValue, StoreRepository,
};

use super::aggregate::{CastMember, CastMemberType};

/// Structured cast member filter; every present field must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMemberFilter {
    /// Case-insensitive name fragment
    pub name: Option<String>,
    /// Exact role
    #[serde(rename = "type")]
    pub member_type: Option<CastMemberType>,
}

/// Raw cast member filter with an unchecked type code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMemberRawFilter {
    /// Name fragment
    pub name: Option<String>,
    /// Role code
    #[serde(rename = "type")]
    pub member_type: Option<i32>,
}

/// Search parameters of the cast member repository
pub type CastMemberSearchParams = SearchParams<CastMemberFilter>;

/// Search result of the cast member repository
pub type CastMemberSearchResult = SearchResult<CastMember, CastMemberFilter>;

impl SearchParams<CastMemberFilter> {
    /// Coerce raw input, rejecting an unknown type code
    pub fn create(input: SearchInput<CastMemberRawFilter>) -> Result<Self, SearchValidationError> {
        let mut error = SearchValidationError::default();
        let input = input.map_filter(|raw| {
            let member_type = match raw.member_type {
                Some(code) => match CastMemberType::create(code) {
                    Either::Ok(member_type) => Some(member_type),
                    Either::Fail(invalid) => {
                        error.set_from_error("type", &[invalid]);
                        None
                    }
                },
                None => None,
            };
            CastMemberFilter {
                name: raw.name.filter(|name| !name.is_empty()),
                member_type,
            }
        });
        if error.errors.is_empty() {
            Ok(SearchParams::new(input))
        } else {
            Err(error)
        }
    }
}

/// Repository of cast members
pub trait CastMemberRepository: SearchableRepository<CastMember, CastMemberFilter> {}

impl<T> CastMemberRepository for T where
    T: ?Sized + SearchableRepository<CastMember, CastMemberFilter>
{
}

impl Resolvable for dyn CastMemberRepository {
    const NAME: RepositoryName = RepositoryName::CastMember;
}

/// Search behavior of the cast member repository
pub struct CastMemberSearch;

impl SearchSpec<CastMember> for CastMemberSearch {
    type Filter = CastMemberFilter;
    const SORTABLE_FIELDS: &'static [&'static str] = &["name", "created_at"];

    fn matches(filter: &CastMemberFilter, item: &CastMember) -> bool {
        let name_matches = filter.name.as_ref().map_or(true, |name| {
            item.name().to_lowercase().contains(&name.to_lowercase())
        });
        let type_matches = filter
            .member_type
            .map_or(true, |member_type| item.member_type() == member_type);
        name_matches && type_matches
    }

    fn sort_value(item: &CastMember, field: &str) -> Option<SortValue> {
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

/// In-memory cast member repository
pub type CastMemberInMemoryRepository = InMemoryRepository<CastMember, CastMemberSearch>;

/// Store-backed cast member repository
pub type CastMemberStoreRepository = StoreRepository<CastMember, CastMemberSearch>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast_member::CastMemberProps;
    use crate::persistence::{Repository, SearchableRepository};

    #[test]
    fn test_search_params_reject_unknown_type() {
        let input = SearchInput::new().filter(CastMemberRawFilter {
            name: None,
            member_type: Some(7),
        });
        let err = CastMemberSearchParams::create(input).unwrap_err();
        assert_eq!(
            err.errors["type"],
            vec!["Invalid cast member type: 7".to_string()]
        );
    }

    #[tokio::test]
    async fn test_filter_by_name_and_type() {
        let repo = CastMemberInMemoryRepository::new();
        let members = vec![
            CastMember::create(CastMemberProps::new("Ana Director", CastMemberType::Director))
                .unwrap(),
            CastMember::create(CastMemberProps::new("Ana Actor", CastMemberType::Actor)).unwrap(),
            CastMember::create(CastMemberProps::new("Bruno", CastMemberType::Actor)).unwrap(),
        ];
        repo.bulk_insert(&members).await.unwrap();

        let params = CastMemberSearchParams::create(SearchInput::new().filter(
            CastMemberRawFilter {
                name: Some("ana".to_string()),
                member_type: Some(2),
            },
        ))
        .unwrap();
        let result = repo.search(&params).await.unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].name(), "Ana Actor");
    }
}
