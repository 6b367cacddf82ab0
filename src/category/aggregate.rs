// Copyright 2025 Cowboy AI, LLC.

//! Category aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{AggregateRoot, Entity, PersistentEntity};
use crate::errors::{DomainResult, EntityValidationError, FieldsErrors};
use crate::identifiers::EntityId;
use crate::validation::{validate_props, FieldRules, ValidatorFields, MAX_TEXT_LENGTH};

/// Identity of a [`Category`]
pub type CategoryId = EntityId<Category>;

/// Properties of a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProps {
    /// Display name
    pub name: String,
    /// Optional free text
    pub description: Option<String>,
    /// Active categories are listed to viewers
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl CategoryProps {
    /// Active category named `name`, created now
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
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

/// Field rules of a category
#[derive(Debug, Default)]
pub struct CategoryValidator {
    errors: FieldsErrors,
}

impl ValidatorFields<CategoryProps> for CategoryValidator {
    fn validate(&mut self, props: &CategoryProps) -> bool {
        self.errors.clear();
        FieldRules::new(&mut self.errors, "name")
            .required(&props.name)
            .max_length(&props.name, MAX_TEXT_LENGTH);
        self.errors.is_empty()
    }

    fn errors(&self) -> &FieldsErrors {
        &self.errors
    }
}

/// A category of videos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    props: CategoryProps,
}

impl Category {
    /// Validate `props` and create a category with a new id
    pub fn create(props: CategoryProps) -> Result<Self, EntityValidationError> {
        Self::restore(CategoryId::new(), props)
    }

    /// Validate `props` and rebuild a category with an existing id
    pub fn restore(id: CategoryId, props: CategoryProps) -> Result<Self, EntityValidationError> {
        validate_props::<_, CategoryValidator>(&props)?;
        Ok(Self { id, props })
    }

    /// Rename and describe
    pub fn update(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<(), EntityValidationError> {
        let mut next = self.props.clone();
        next.name = name.into();
        next.description = description;
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

    fn replace(&mut self, next: CategoryProps) -> Result<(), EntityValidationError> {
        validate_props::<_, CategoryValidator>(&next)?;
        self.props = next;
        Ok(())
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.props.name
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.props.description.as_deref()
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

/// Wire shape of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryJson {
    /// Identity
    pub id: CategoryId,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Active flag
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Entity for Category {
    const NAME: &'static str = "Category";
    type Props = CategoryProps;
    type Json = CategoryJson;

    fn entity_id(&self) -> &CategoryId {
        &self.id
    }

    fn props(&self) -> &CategoryProps {
        &self.props
    }

    fn to_json(&self) -> CategoryJson {
        CategoryJson {
            id: self.id.clone(),
            name: self.props.name.clone(),
            description: self.props.description.clone(),
            is_active: self.props.is_active,
            created_at: self.props.created_at,
        }
    }
}

impl AggregateRoot for Category {}

impl PersistentEntity for Category {
    fn from_json(json: CategoryJson) -> DomainResult<Self> {
        let props = CategoryProps {
            name: json.name,
            description: json.description,
            is_active: json.is_active,
            created_at: json.created_at,
        };
        Ok(Self::restore(json.id, props)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_with_defaults() {
        let category = Category::create(CategoryProps::new("Movie")).unwrap();

        assert_eq!(category.name(), "Movie");
        assert_eq!(category.description(), None);
        assert!(category.is_active());
        assert_eq!(category.id().len(), 36);
    }

    #[test]
    fn test_create_rejects_invalid_name() {
        let err = Category::create(CategoryProps::new("")).unwrap_err();
        assert_eq!(err.errors["name"], vec!["name should not be empty".to_string()]);

        let err = Category::create(CategoryProps::new("t".repeat(256))).unwrap_err();
        assert_eq!(
            err.errors["name"],
            vec!["name must be shorter than or equal to 255 characters".to_string()]
        );
    }

    #[test]
    fn test_update_replaces_props_only_when_valid() {
        let mut category =
            Category::create(CategoryProps::new("Movie").with_description("old")).unwrap();

        category
            .update("Documentary", Some("new".to_string()))
            .unwrap();
        assert_eq!(category.name(), "Documentary");
        assert_eq!(category.description(), Some("new"));

        assert!(category.update("", None).is_err());
        assert_eq!(category.name(), "Documentary");
        assert_eq!(category.description(), Some("new"));
    }

    #[test]
    fn test_activate_and_deactivate() {
        let mut category = Category::create(CategoryProps::new("Movie")).unwrap();
        category.deactivate().unwrap();
        assert!(!category.is_active());
        category.activate().unwrap();
        assert!(category.is_active());
    }

    #[test]
    fn test_json_round_trip() {
        let category =
            Category::create(CategoryProps::new("Movie").with_description("desc")).unwrap();
        let json = category.to_json();

        assert_eq!(json.id.as_str(), category.id());
        assert_eq!(json.description.as_deref(), Some("desc"));
        assert_eq!(Category::from_json(json).unwrap(), category);
    }

    #[test]
    fn test_from_json_revalidates() {
        let mut json = Category::create(CategoryProps::new("Movie")).unwrap().to_json();
        json.name = String::new();
        let err = Category::from_json(json).unwrap_err();
        assert!(err.is_validation_error());
    }
}
