// Copyright 2025 Cowboy AI, LLC.

//! Video aggregate
//!
//! A video references categories, genres and cast members by id. Its numeric
//! and rating fields are value objects; [`Video::create`] reports invalid
//! value objects together with the field rule failures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cast_member::{CastMember, CastMemberId};
use crate::category::{Category, CategoryId};
use crate::either::Either;
use crate::entity::{AggregateRoot, Entity, PersistentEntity};
use crate::errors::{DomainResult, EntityValidationError, FieldsErrors};
use crate::genre::{Genre, GenreId};
use crate::identifiers::{EntityId, OrderedIdSet};
use crate::validation::{validate_props, FieldRules, ValidatorFields, MAX_TEXT_LENGTH};

use super::value_objects::{Minutes, Rating, Year};

/// Identity of a [`Video`]
pub type VideoId = EntityId<Video>;

/// Properties of a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoProps {
    /// Title
    pub title: String,
    /// Synopsis
    pub description: String,
    /// Launch year
    pub year_launched: Year,
    /// Duration
    pub duration: Minutes,
    /// Age classification
    pub rating: Rating,
    /// Free to watch without subscription
    pub opened: bool,
    /// Visible in the catalog
    pub published: bool,
    /// Category references
    pub categories_id: OrderedIdSet<Category>,
    /// Genre references
    pub genres_id: OrderedIdSet<Genre>,
    /// Cast member references
    pub cast_members_id: OrderedIdSet<CastMember>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Raw input of [`Video::create`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCreateCommand {
    /// Title
    pub title: String,
    /// Synopsis
    pub description: String,
    /// Launch year
    pub year_launched: i64,
    /// Duration in minutes
    pub duration: i64,
    /// Rating code
    pub rating: String,
    /// Free to watch without subscription
    pub opened: bool,
    /// Category references
    pub categories_id: Vec<CategoryId>,
    /// Genre references
    pub genres_id: Vec<GenreId>,
    /// Cast member references
    pub cast_members_id: Vec<CastMemberId>,
}

/// Field rules of a video
#[derive(Debug, Default)]
pub struct VideoValidator {
    errors: FieldsErrors,
}

impl VideoValidator {
    fn check(
        errors: &mut FieldsErrors,
        title: &str,
        description: &str,
        relations: [(&str, usize); 3],
    ) {
        FieldRules::new(errors, "title")
            .required(title)
            .max_length(title, MAX_TEXT_LENGTH);
        FieldRules::new(errors, "description").required(description);
        for (field, count) in relations {
            FieldRules::new(errors, field).not_empty(count);
        }
    }
}

impl ValidatorFields<VideoProps> for VideoValidator {
    fn validate(&mut self, props: &VideoProps) -> bool {
        self.errors.clear();
        Self::check(
            &mut self.errors,
            &props.title,
            &props.description,
            [
                ("categories_id", props.categories_id.len()),
                ("genres_id", props.genres_id.len()),
                ("cast_members_id", props.cast_members_id.len()),
            ],
        );
        self.errors.is_empty()
    }

    fn errors(&self) -> &FieldsErrors {
        &self.errors
    }
}

fn accept<T, E: std::fmt::Display>(
    value: Either<T, E>,
    field: &str,
    error: &mut EntityValidationError,
) -> Option<T> {
    match value {
        Either::Ok(value) => Some(value),
        Either::Fail(invalid) => {
            error.set_from_error(field, &[invalid]);
            None
        }
    }
}

/// A catalog video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    id: VideoId,
    props: VideoProps,
}

impl Video {
    /// Build from raw input, reporting every invalid field at once
    pub fn create(command: VideoCreateCommand) -> Result<Self, EntityValidationError> {
        let mut fields = FieldsErrors::new();
        VideoValidator::check(
            &mut fields,
            &command.title,
            &command.description,
            [
                ("categories_id", command.categories_id.len()),
                ("genres_id", command.genres_id.len()),
                ("cast_members_id", command.cast_members_id.len()),
            ],
        );
        let mut error = EntityValidationError::new(fields);
        let year_launched = accept(Year::create(command.year_launched), "year_launched", &mut error);
        let duration = accept(Minutes::create(command.duration), "duration", &mut error);
        let rating = accept(Rating::create(&command.rating), "rating", &mut error);

        match (year_launched, duration, rating) {
            (Some(year_launched), Some(duration), Some(rating)) if error.errors.is_empty() => {
                Self::restore(
                    VideoId::new(),
                    VideoProps {
                        title: command.title,
                        description: command.description,
                        year_launched,
                        duration,
                        rating,
                        opened: command.opened,
                        published: false,
                        categories_id: command.categories_id.into_iter().collect(),
                        genres_id: command.genres_id.into_iter().collect(),
                        cast_members_id: command.cast_members_id.into_iter().collect(),
                        created_at: Utc::now(),
                    },
                )
            }
            _ => Err(error),
        }
    }

    /// Validate `props` and rebuild with an existing id
    pub fn restore(id: VideoId, props: VideoProps) -> Result<Self, EntityValidationError> {
        validate_props::<_, VideoValidator>(&props)?;
        Ok(Self { id, props })
    }

    /// Change title and synopsis
    pub fn update(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), EntityValidationError> {
        let mut next = self.props.clone();
        next.title = title.into();
        next.description = description.into();
        self.replace(next)
    }

    /// Make visible in the catalog
    pub fn publish(&mut self) -> Result<(), EntityValidationError> {
        let mut next = self.props.clone();
        next.published = true;
        self.replace(next)
    }

    /// Hide from the catalog
    pub fn unpublish(&mut self) -> Result<(), EntityValidationError> {
        let mut next = self.props.clone();
        next.published = false;
        self.replace(next)
    }

    /// Replace category references; an empty list leaves them unchanged
    pub fn update_categories_id(
        &mut self,
        ids: impl IntoIterator<Item = CategoryId>,
    ) -> Result<(), EntityValidationError> {
        let ids: OrderedIdSet<Category> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(());
        }
        let mut next = self.props.clone();
        next.categories_id = ids;
        self.replace(next)
    }

    /// Replace genre references; an empty list leaves them unchanged
    pub fn update_genres_id(
        &mut self,
        ids: impl IntoIterator<Item = GenreId>,
    ) -> Result<(), EntityValidationError> {
        let ids: OrderedIdSet<Genre> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(());
        }
        let mut next = self.props.clone();
        next.genres_id = ids;
        self.replace(next)
    }

    /// Replace cast member references; an empty list leaves them unchanged
    pub fn update_cast_members_id(
        &mut self,
        ids: impl IntoIterator<Item = CastMemberId>,
    ) -> Result<(), EntityValidationError> {
        let ids: OrderedIdSet<CastMember> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(());
        }
        let mut next = self.props.clone();
        next.cast_members_id = ids;
        self.replace(next)
    }

    fn replace(&mut self, next: VideoProps) -> Result<(), EntityValidationError> {
        validate_props::<_, VideoValidator>(&next)?;
        self.props = next;
        Ok(())
    }

    /// Title
    pub fn title(&self) -> &str {
        &self.props.title
    }

    /// Synopsis
    pub fn description(&self) -> &str {
        &self.props.description
    }

    /// Launch year
    pub fn year_launched(&self) -> Year {
        self.props.year_launched
    }

    /// Duration
    pub fn duration(&self) -> Minutes {
        self.props.duration
    }

    /// Age classification
    pub fn rating(&self) -> Rating {
        self.props.rating
    }

    /// Free to watch
    pub fn is_opened(&self) -> bool {
        self.props.opened
    }

    /// Visible in the catalog
    pub fn is_published(&self) -> bool {
        self.props.published
    }

    /// Category references
    pub fn categories_id(&self) -> &OrderedIdSet<Category> {
        &self.props.categories_id
    }

    /// Genre references
    pub fn genres_id(&self) -> &OrderedIdSet<Genre> {
        &self.props.genres_id
    }

    /// Cast member references
    pub fn cast_members_id(&self) -> &OrderedIdSet<CastMember> {
        &self.props.cast_members_id
    }

    /// Creation time
    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }
}

/// Wire shape of a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoJson {
    /// Identity
    pub id: VideoId,
    /// Title
    pub title: String,
    /// Synopsis
    pub description: String,
    /// Launch year
    pub year_launched: Year,
    /// Duration in minutes
    pub duration: Minutes,
    /// Rating code
    pub rating: Rating,
    /// Free to watch
    pub opened: bool,
    /// Visible in the catalog
    pub published: bool,
    /// Category references
    pub categories_id: Vec<CategoryId>,
    /// Genre references
    pub genres_id: Vec<GenreId>,
    /// Cast member references
    pub cast_members_id: Vec<CastMemberId>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Entity for Video {
    const NAME: &'static str = "Video";
    type Props = VideoProps;
    type Json = VideoJson;

    fn entity_id(&self) -> &VideoId {
        &self.id
    }

    fn props(&self) -> &VideoProps {
        &self.props
    }

    fn to_json(&self) -> VideoJson {
        VideoJson {
            id: self.id.clone(),
            title: self.props.title.clone(),
            description: self.props.description.clone(),
            year_launched: self.props.year_launched,
            duration: self.props.duration,
            rating: self.props.rating,
            opened: self.props.opened,
            published: self.props.published,
            categories_id: self.props.categories_id.to_vec(),
            genres_id: self.props.genres_id.to_vec(),
            cast_members_id: self.props.cast_members_id.to_vec(),
            created_at: self.props.created_at,
        }
    }
}

impl AggregateRoot for Video {}

impl PersistentEntity for Video {
    fn from_json(json: VideoJson) -> DomainResult<Self> {
        let props = VideoProps {
            title: json.title,
            description: json.description,
            year_launched: json.year_launched,
            duration: json.duration,
            rating: json.rating,
            opened: json.opened,
            published: json.published,
            categories_id: json.categories_id.into_iter().collect(),
            genres_id: json.genres_id.into_iter().collect(),
            cast_members_id: json.cast_members_id.into_iter().collect(),
            created_at: json.created_at,
        };
        Ok(Self::restore(json.id, props)?)
    }
}
