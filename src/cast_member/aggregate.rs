// Copyright 2025 Cowboy AI, LLC.

//! Cast member aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::either::Either;
use crate::entity::{AggregateRoot, Entity, PersistentEntity};
use crate::errors::{DomainResult, EntityValidationError, FieldsErrors};
use crate::identifiers::EntityId;
use crate::validation::{validate_props, FieldRules, ValidatorFields, MAX_TEXT_LENGTH};

/// Identity of a [`CastMember`]
pub type CastMemberId = EntityId<CastMember>;

/// A raw cast member type outside the known values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid cast member type: {value}")]
pub struct InvalidCastMemberTypeError {
    /// The offending raw value
    pub value: i32,
}

/// Role of a cast member, stored as its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastMemberType {
    /// Code 1
    Director,
    /// Code 2
    Actor,
}

impl CastMemberType {
    /// Parse a numeric code
    pub fn create(value: i32) -> Either<Self, InvalidCastMemberTypeError> {
        match value {
            1 => Either::ok(CastMemberType::Director),
            2 => Either::ok(CastMemberType::Actor),
            _ => Either::fail(InvalidCastMemberTypeError { value }),
        }
    }

    /// Numeric code
    pub fn code(&self) -> i32 {
        match self {
            CastMemberType::Director => 1,
            CastMemberType::Actor => 2,
        }
    }
}

impl fmt::Display for CastMemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastMemberType::Director => f.write_str("director"),
            CastMemberType::Actor => f.write_str("actor"),
        }
    }
}

impl Serialize for CastMemberType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for CastMemberType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i32::deserialize(deserializer)?;
        CastMemberType::create(code)
            .into_result()
            .map_err(serde::de::Error::custom)
    }
}

/// Properties of a cast member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMemberProps {
    /// Full name
    pub name: String,
    /// Role
    pub member_type: CastMemberType,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl CastMemberProps {
    /// Cast member created now
    pub fn new(name: impl Into<String>, member_type: CastMemberType) -> Self {
        Self {
            name: name.into(),
            member_type,
            created_at: Utc::now(),
        }
    }

    /// Set the creation time
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Field rules of a cast member
#[derive(Debug, Default)]
pub struct CastMemberValidator {
    errors: FieldsErrors,
}

impl ValidatorFields<CastMemberProps> for CastMemberValidator {
    fn validate(&mut self, props: &CastMemberProps) -> bool {
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

/// A director or actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    id: CastMemberId,
    props: CastMemberProps,
}

impl CastMember {
    /// Validate `props` and create with a new id
    pub fn create(props: CastMemberProps) -> Result<Self, EntityValidationError> {
        Self::restore(CastMemberId::new(), props)
    }

    /// Validate `props` and rebuild with an existing id
    pub fn restore(
        id: CastMemberId,
        props: CastMemberProps,
    ) -> Result<Self, EntityValidationError> {
        validate_props::<_, CastMemberValidator>(&props)?;
        Ok(Self { id, props })
    }

    /// Create from a raw type code, folding a bad code into the field errors
    pub fn create_raw(name: impl Into<String>, type_code: i32) -> Result<Self, EntityValidationError> {
        let name = name.into();
        match CastMemberType::create(type_code) {
            Either::Ok(member_type) => Self::create(CastMemberProps::new(name, member_type)),
            Either::Fail(invalid) => {
                let mut err = Self::create(CastMemberProps::new(name, CastMemberType::Actor))
                    .err()
                    .unwrap_or_default();
                err.set_from_error("type", &[invalid]);
                Err(err)
            }
        }
    }

    /// Rename and change the role
    pub fn update(
        &mut self,
        name: impl Into<String>,
        member_type: CastMemberType,
    ) -> Result<(), EntityValidationError> {
        let mut next = self.props.clone();
        next.name = name.into();
        next.member_type = member_type;
        validate_props::<_, CastMemberValidator>(&next)?;
        self.props = next;
        Ok(())
    }

    /// Full name
    pub fn name(&self) -> &str {
        &self.props.name
    }

    /// Role
    pub fn member_type(&self) -> CastMemberType {
        self.props.member_type
    }

    /// Creation time
    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }
}

/// Wire shape of a cast member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMemberJson {
    /// Identity
    pub id: CastMemberId,
    /// Full name
    pub name: String,
    /// Role code
    #[serde(rename = "type")]
    pub member_type: CastMemberType,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Entity for CastMember {
    const NAME: &'static str = "CastMember";
    type Props = CastMemberProps;
    type Json = CastMemberJson;

    fn entity_id(&self) -> &CastMemberId {
        &self.id
    }

    fn props(&self) -> &CastMemberProps {
        &self.props
    }

    fn to_json(&self) -> CastMemberJson {
        CastMemberJson {
            id: self.id.clone(),
            name: self.props.name.clone(),
            member_type: self.props.member_type,
            created_at: self.props.created_at,
        }
    }
}

impl AggregateRoot for CastMember {}

impl PersistentEntity for CastMember {
    fn from_json(json: CastMemberJson) -> DomainResult<Self> {
        let props = CastMemberProps {
            name: json.name,
            member_type: json.member_type,
            created_at: json.created_at,
        };
        Ok(Self::restore(json.id, props)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(1, Some(CastMemberType::Director))]
    #[test_case(2, Some(CastMemberType::Actor))]
    #[test_case(0, None)]
    #[test_case(3, None)]
    fn test_type_codes(code: i32, expected: Option<CastMemberType>) {
        let (value, error) = CastMemberType::create(code).as_array();
        assert_eq!(value, expected);
        assert_eq!(error.is_some(), expected.is_none());
    }

    #[test]
    fn test_json_uses_type_code() {
        let member = CastMember::create(CastMemberProps::new("Ana", CastMemberType::Director)).unwrap();
        let value = serde_json::to_value(member.to_json()).unwrap();
        assert_eq!(value["type"], json!(1));
        assert_eq!(value["name"], json!("Ana"));

        let back: CastMemberJson = serde_json::from_value(value).unwrap();
        assert_eq!(CastMember::from_json(back).unwrap(), member);
    }

    #[test]
    fn test_create_raw_merges_type_error() {
        let err = CastMember::create_raw("", 9).unwrap_err();
        assert_eq!(err.errors["name"], vec!["name should not be empty".to_string()]);
        assert_eq!(err.errors["type"], vec!["Invalid cast member type: 9".to_string()]);

        let member = CastMember::create_raw("Ana", 2).unwrap();
        assert_eq!(member.member_type(), CastMemberType::Actor);
    }

    #[test]
    fn test_update_is_all_or_nothing() {
        let mut member = CastMember::create(CastMemberProps::new("Ana", CastMemberType::Actor)).unwrap();
        assert!(member.update("", CastMemberType::Director).is_err());
        assert_eq!(member.member_type(), CastMemberType::Actor);

        member.update("Bia", CastMemberType::Director).unwrap();
        assert_eq!(member.name(), "Bia");
        assert_eq!(member.member_type(), CastMemberType::Director);
    }
}
