// Copyright 2025 Cowboy AI, LLC.

//! Genre use cases
//!
//! Writes go through [`UnitOfWork::run`], so a use case started inside an
//! explicit transaction joins it and one started alone commits on its own.
//! Category references are checked with the [`CategoriesIdsValidator`]; its
//! failures are merged under `categories_id` into the genre's own
//! validation error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::category::{CategoriesIdsValidator, Category, CategoryId, CategoryRepository};
use crate::entity::Entity;
use crate::errors::{DomainError, DomainResult, EntityValidationError};
use crate::persistence::{SearchInput, SearchResult, UnitOfWork};

use super::aggregate::{Genre, GenreProps};
use super::repository::{GenreRawFilter, GenreRepository, GenreSearchParams};

/// An application operation
#[async_trait]
pub trait UseCase: Send + Sync {
    /// Input of the operation
    type Input: Send;
    /// Output of the operation
    type Output: Send;

    /// Run the operation
    async fn execute(&self, input: Self::Input) -> DomainResult<Self::Output>;
}

/// Genre without its relations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreOutput {
    /// Identity
    pub id: String,
    /// Display name
    pub name: String,
    /// Category references
    pub categories_id: Vec<String>,
    /// Active flag
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<&Genre> for GenreOutput {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id().to_string(),
            name: genre.name().to_string(),
            categories_id: genre.categories_id().values(),
            is_active: genre.is_active(),
            created_at: genre.created_at(),
        }
    }
}

/// Category as shown inside a genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCategoryOutput {
    /// Identity
    pub id: String,
    /// Display name
    pub name: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<&Category> for GenreCategoryOutput {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id().to_string(),
            name: category.name().to_string(),
            created_at: category.created_at(),
        }
    }
}

/// Genre with its categories resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreWithRelationsOutput {
    /// Identity
    pub id: String,
    /// Display name
    pub name: String,
    /// Resolved categories
    pub categories: Vec<GenreCategoryOutput>,
    /// Category references
    pub categories_id: Vec<String>,
    /// Active flag
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl GenreWithRelationsOutput {
    /// Combine a genre with the categories it references
    ///
    /// Categories not referenced by the genre are skipped.
    pub fn new(genre: &Genre, categories: &[Category]) -> Self {
        let GenreOutput {
            id,
            name,
            categories_id,
            is_active,
            created_at,
        } = GenreOutput::from(genre);
        Self {
            id,
            name,
            categories: categories
                .iter()
                .filter(|category| genre.categories_id().contains(category.id()))
                .map(GenreCategoryOutput::from)
                .collect(),
            categories_id,
            is_active,
            created_at,
        }
    }
}

/// A page of outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationOutput<T> {
    /// Items of the page
    pub items: Vec<T>,
    /// Matches before pagination
    pub total: usize,
    /// Page number, from 1
    pub current_page: usize,
    /// Last page number
    pub last_page: usize,
    /// Page size
    pub per_page: usize,
}

impl<T> PaginationOutput<T> {
    /// Page metadata of `result` around `items`
    pub fn new<E, F>(items: Vec<T>, result: &SearchResult<E, F>) -> Self {
        Self {
            items,
            total: result.total,
            current_page: result.current_page,
            last_page: result.last_page,
            per_page: result.per_page,
        }
    }
}

fn merge_ids_errors(
    mut err: EntityValidationError,
    ids_errors: Option<Vec<DomainError>>,
) -> DomainError {
    err.set_from_error("categories_id", &ids_errors.unwrap_or_default());
    err.into()
}

/// Input of [`CreateGenre`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGenreInput {
    /// Display name
    pub name: String,
    /// Raw category ids
    pub categories_id: Vec<String>,
    /// Active flag, active when omitted
    pub is_active: Option<bool>,
}

/// Create a genre
pub struct CreateGenre<U> {
    uow: Arc<U>,
    categories_ids_validator: Arc<CategoriesIdsValidator>,
}

impl<U: UnitOfWork + 'static> CreateGenre<U> {
    /// Use case writing through `uow`
    pub fn new(uow: Arc<U>, categories_ids_validator: Arc<CategoriesIdsValidator>) -> Self {
        Self {
            uow,
            categories_ids_validator,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork + 'static> UseCase for CreateGenre<U> {
    type Input = CreateGenreInput;
    type Output = GenreOutput;

    async fn execute(&self, input: CreateGenreInput) -> DomainResult<GenreOutput> {
        let (categories_id, ids_errors) = self
            .categories_ids_validator
            .validate(input.categories_id)
            .await?
            .as_array();

        let props = GenreProps::new(input.name, categories_id.unwrap_or_default())
            .with_active(input.is_active.unwrap_or(true));
        let genre = Genre::create(props).map_err(|err| merge_ids_errors(err, ids_errors))?;

        let entity = genre.clone();
        self.uow
            .run(move |uow| {
                Box::pin(async move {
                    let genres = uow.get_repository::<dyn GenreRepository>().await?;
                    genres.insert(&entity).await
                })
            })
            .await?;

        Ok(GenreOutput::from(&genre))
    }
}

/// Input of [`UpdateGenre`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateGenreInput {
    /// Genre to update
    pub id: String,
    /// New name
    pub name: String,
    /// Replacement category ids, at least one
    pub categories_id: Vec<String>,
    /// New active flag, unchanged when omitted
    pub is_active: Option<bool>,
}

/// Update a genre
pub struct UpdateGenre<U> {
    uow: Arc<U>,
    categories_ids_validator: Arc<CategoriesIdsValidator>,
}

impl<U: UnitOfWork + 'static> UpdateGenre<U> {
    /// Use case writing through `uow`
    pub fn new(uow: Arc<U>, categories_ids_validator: Arc<CategoriesIdsValidator>) -> Self {
        Self {
            uow,
            categories_ids_validator,
        }
    }
}

fn apply_update(
    genre: &mut Genre,
    name: String,
    categories_id: Option<Vec<CategoryId>>,
    is_active: Option<bool>,
) -> Result<(), EntityValidationError> {
    genre.update(name)?;
    let Some(categories_id) = categories_id else {
        return Err(EntityValidationError::default());
    };
    genre.update_categories_id(categories_id)?;
    match is_active {
        Some(true) => genre.activate(),
        Some(false) => genre.deactivate(),
        None => Ok(()),
    }
}

#[async_trait]
impl<U: UnitOfWork + 'static> UseCase for UpdateGenre<U> {
    type Input = UpdateGenreInput;
    type Output = GenreOutput;

    async fn execute(&self, input: UpdateGenreInput) -> DomainResult<GenreOutput> {
        let validator = self.categories_ids_validator.clone();
        self.uow
            .run(move |uow| Box::pin(update_genre(uow, validator, input)))
            .await
    }
}

async fn update_genre<U: UnitOfWork>(
    uow: &U,
    validator: Arc<CategoriesIdsValidator>,
    input: UpdateGenreInput,
) -> DomainResult<GenreOutput> {
    let genres = uow.get_repository::<dyn GenreRepository>().await?;
    let mut genre = genres.find_by_id(&input.id).await?;

    let (categories_id, ids_errors) = validator.validate(input.categories_id).await?.as_array();
    apply_update(&mut genre, input.name, categories_id, input.is_active)
        .map_err(|err| merge_ids_errors(err, ids_errors))?;

    genres.update(&genre).await?;
    Ok(GenreOutput::from(&genre))
}

/// Delete a genre by id
pub struct DeleteGenre<U> {
    uow: Arc<U>,
}

impl<U: UnitOfWork + 'static> DeleteGenre<U> {
    /// Use case writing through `uow`
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork + 'static> UseCase for DeleteGenre<U> {
    type Input = String;
    type Output = ();

    async fn execute(&self, id: String) -> DomainResult<()> {
        self.uow
            .run(move |uow| {
                Box::pin(async move {
                    let genres = uow.get_repository::<dyn GenreRepository>().await?;
                    genres.delete(&id).await
                })
            })
            .await
    }
}

/// Fetch a genre with its categories
pub struct GetGenre {
    genres: Arc<dyn GenreRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl GetGenre {
    /// Use case reading from the given repositories
    pub fn new(genres: Arc<dyn GenreRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { genres, categories }
    }
}

#[async_trait]
impl UseCase for GetGenre {
    type Input = String;
    type Output = GenreWithRelationsOutput;

    async fn execute(&self, id: String) -> DomainResult<GenreWithRelationsOutput> {
        let genre = self.genres.find_by_id(&id).await?;
        let categories = self
            .categories
            .find_by_ids(&genre.categories_id().to_vec())
            .await?;
        Ok(GenreWithRelationsOutput::new(&genre, &categories))
    }
}

/// Search genres and resolve their categories
pub struct ListGenres {
    genres: Arc<dyn GenreRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ListGenres {
    /// Use case reading from the given repositories
    pub fn new(genres: Arc<dyn GenreRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { genres, categories }
    }
}

#[async_trait]
impl UseCase for ListGenres {
    type Input = SearchInput<GenreRawFilter>;
    type Output = PaginationOutput<GenreWithRelationsOutput>;

    async fn execute(
        &self,
        input: SearchInput<GenreRawFilter>,
    ) -> DomainResult<PaginationOutput<GenreWithRelationsOutput>> {
        let params = GenreSearchParams::create(input)?;
        let result = self.genres.search(&params).await?;

        let related: Vec<_> = result
            .items
            .iter()
            .flat_map(|genre| genre.categories_id().to_vec())
            .collect();
        let categories = if related.is_empty() {
            Vec::new()
        } else {
            self.categories.find_by_ids(&related).await?
        };

        let items = result
            .items
            .iter()
            .map(|genre| GenreWithRelationsOutput::new(genre, &categories))
            .collect();
        Ok(PaginationOutput::new(items, &result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryProps;
    use crate::errors::InvalidIdentifierError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_relations_output_keeps_only_referenced_categories() {
        let movie = Category::create(CategoryProps::new("Movie")).unwrap();
        let other = Category::create(CategoryProps::new("Other")).unwrap();
        let genre =
            Genre::create(GenreProps::new("Action", vec![movie.entity_id().clone()])).unwrap();

        let output = GenreWithRelationsOutput::new(&genre, &[movie.clone(), other]);
        assert_eq!(output.categories.len(), 1);
        assert_eq!(output.categories[0].name, "Movie");
        assert_eq!(output.categories_id, vec![movie.id().to_string()]);
    }

    #[test]
    fn test_update_without_valid_ids_fails_validation() {
        let mut genre =
            Genre::create(GenreProps::new("Action", vec![CategoryId::new()])).unwrap();
        let err = apply_update(&mut genre, "Drama".to_string(), None, None).unwrap_err();
        assert!(err.errors.is_empty());

        let merged = merge_ids_errors(
            err,
            Some(vec![InvalidIdentifierError::new("fake").into()]),
        );
        match merged {
            DomainError::EntityValidation(err) => assert_eq!(
                err.errors["categories_id"],
                vec!["ID fake must be a valid UUID".to_string()]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }
}
