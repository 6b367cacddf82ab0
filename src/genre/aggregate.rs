// Copyright 2025 Cowboy AI, LLC.

//! Genre aggregate
//!
//! A genre references its categories by id only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryId};
use crate::entity::{AggregateRoot, Entity, PersistentEntity};
use crate::errors::{DomainResult, EntityValidationError, FieldsErrors};
use crate::identifiers::{EntityId, OrderedIdSet};
use crate::validation::{validate_props, FieldRules, ValidatorFields, MAX_TEXT_LENGTH};

/// Identity of a [`Genre`]
pub type GenreId = EntityId<Genre>;

/// Properties of a genre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreProps {
    /// Display name
    pub name: String,
    /// Categories this genre belongs to, never empty
    pub categories_id: OrderedIdSet<Category>,
    /// Active flag
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl GenreProps {
    /// Active genre created now
    pub fn new(name: impl Into<String>, categories_id: impl IntoIterator<Item = CategoryId>) -> Self {
        Self {
            name: name.into(),
            categories_id: categories_id.into_iter().collect(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Set the active flag
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Set the creation time
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Field rules of a genre
#[derive(Debug, Default)]
pub struct GenreValidator {
    errors: FieldsErrors,
}

impl ValidatorFields<GenreProps> for GenreValidator {
    fn validate(&mut self, props: &GenreProps) -> bool {
        self.errors.clear();
        FieldRules::new(&mut self.errors, "name")
            .required(&props.name)
            .max_length(&props.name, MAX_TEXT_LENGTH);
        FieldRules::new(&mut self.errors, "categories_id").not_empty(props.categories_id.len());
        self.errors.is_empty()
    }

    fn errors(&self) -> &FieldsErrors {
        &self.errors
    }
}

/// A genre of videos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    id: GenreId,
    props: GenreProps,
}

impl Genre {
    /// Validate `props` and create with a new id
    pub fn create(props: GenreProps) -> Result<Self, EntityValidationError> {
        Self::restore(GenreId::new(), props)
    }

    /// Validate `props` and rebuild with an existing id
    pub fn restore(id: GenreId, props: GenreProps) -> Result<Self, EntityValidationError> {
        validate_props::<_, GenreValidator>(&props)?;
        Ok(Self { id, props })
    }

    /// Rename
    pub fn update(&mut self, name: impl Into<String>) -> Result<(), EntityValidationError> {
        let mut next = self.props.clone();
        next.name = name.into();
        self.replace(next)
    }

    /// Add a category reference
    pub fn add_category_id(&mut self, id: CategoryId) -> Result<(), EntityValidationError> {
        let mut next = self.props.clone();
        next.categories_id.insert(id);
        self.replace(next)
    }

    /// Remove a category reference; removing the last one is rejected
    pub fn remove_category_id(&mut self, id: &CategoryId) -> Result<(), EntityValidationError> {
        let mut next = self.props.clone();
        next.categories_id.remove(id);
        self.replace(next)
    }

    /// Replace every category reference; an empty list leaves them unchanged
    pub fn update_categories_id(
        &mut self,
        ids: impl IntoIterator<Item = CategoryId>,
    ) -> Result<(), EntityValidationError> {
        let categories_id: OrderedIdSet<Category> = ids.into_iter().collect();
        if categories_id.is_empty() {
            return Ok(());
        }
        let mut next = self.props.clone();
        next.categories_id = categories_id;
        self.replace(next)
    }

    /// Mark as active
    pub fn activate(&mut self) -> Result<(), EntityValidationError> {
        let next = self.props.clone().with_active(true);
        self.replace(next)
    }

    /// Mark as inactive
    pub fn deactivate(&mut self) -> Result<(), EntityValidationError> {
        let next = self.props.clone().with_active(false);
        self.replace(next)
    }

    fn replace(&mut self, next: GenreProps) -> Result<(), EntityValidationError> {
        validate_props::<_, GenreValidator>(&next)?;
        self.props = next;
        Ok(())
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.props.name
    }

    /// Category references in insertion order
    pub fn categories_id(&self) -> &OrderedIdSet<Category> {
        &self.props.categories_id
    }

    /// Active flag
    pub fn is_active(&self) -> bool {
        self.props.is_active
    }

    /// Creation time
    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }
}

/// Wire shape of a genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreJson {
    /// Identity
    pub id: GenreId,
    /// Display name
    pub name: String,
    /// Category references
    pub categories_id: Vec<CategoryId>,
    /// Active flag
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Entity for Genre {
    const NAME: &'static str = "Genre";
    type Props = GenreProps;
    type Json = GenreJson;

    fn entity_id(&self) -> &GenreId {
        &self.id
    }

    fn props(&self) -> &GenreProps {
        &self.props
    }

    fn to_json(&self) -> GenreJson {
        GenreJson {
            id: self.id.clone(),
            name: self.props.name.clone(),
            categories_id: self.props.categories_id.to_vec(),
            is_active: self.props.is_active,
            created_at: self.props.created_at,
        }
    }
}

impl AggregateRoot for Genre {}

impl PersistentEntity for Genre {
    fn from_json(json: GenreJson) -> DomainResult<Self> {
        let props = GenreProps::new(json.name, json.categories_id)
            .with_active(json.is_active)
            .with_created_at(json.created_at);
        Ok(Self::restore(json.id, props)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn genre_with(ids: Vec<CategoryId>) -> Genre {
        Genre::create(GenreProps::new("Action", ids)).unwrap()
    }

    #[test]
    fn test_create_requires_name_and_categories() {
        let err = Genre::create(GenreProps::new("", Vec::new())).unwrap_err();
        assert_eq!(err.errors["name"], vec!["name should not be empty".to_string()]);
        assert_eq!(
            err.errors["categories_id"],
            vec!["categories_id should not be empty".to_string()]
        );
    }

    #[test]
    fn test_category_ids_are_deduplicated_in_order() {
        let first = CategoryId::new();
        let second = CategoryId::new();
        let genre = genre_with(vec![second.clone(), first.clone(), second.clone()]);

        assert_eq!(genre.categories_id().to_vec(), vec![second, first]);
    }

    #[test]
    fn test_add_and_remove_category_ids() {
        let first = CategoryId::new();
        let second = CategoryId::new();
        let mut genre = genre_with(vec![first.clone()]);

        genre.add_category_id(second.clone()).unwrap();
        assert_eq!(genre.categories_id().len(), 2);

        genre.remove_category_id(&first).unwrap();
        assert_eq!(genre.categories_id().to_vec(), vec![second.clone()]);

        assert!(genre.remove_category_id(&second).is_err());
        assert_eq!(genre.categories_id().to_vec(), vec![second]);
    }

    #[test]
    fn test_update_categories_id_ignores_empty_list() {
        let first = CategoryId::new();
        let mut genre = genre_with(vec![first.clone()]);

        genre.update_categories_id(Vec::new()).unwrap();
        assert_eq!(genre.categories_id().to_vec(), vec![first]);

        let replacement = CategoryId::new();
        genre.update_categories_id(vec![replacement.clone()]).unwrap();
        assert_eq!(genre.categories_id().to_vec(), vec![replacement]);
    }

    #[test]
    fn test_json_round_trip() {
        let genre = genre_with(vec![CategoryId::new(), CategoryId::new()]);
        let json = genre.to_json();
        assert_eq!(json.categories_id, genre.categories_id().to_vec());
        assert_eq!(Genre::from_json(json).unwrap(), genre);
    }
}
