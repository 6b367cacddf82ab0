// Copyright 2025 Cowboy AI, LLC.

//! Video value objects
//!
//! Each `create` returns an [`Either`] instead of failing, so callers can
//! collect every invalid field before reporting.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::either::Either;

/// Year is not a positive integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The year must be a positive integer, passed value: {0}")]
pub struct InvalidYearError(pub i64);

/// Minutes is not a positive integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The minutes must be a positive integer, passed value: {0}")]
pub struct InvalidMinutesError(pub i64);

/// Rating outside the known classifications
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The rating must be one of the following values: {}, passed value: {value}", Rating::CODES.join(", "))]
pub struct InvalidRatingError {
    /// The offending raw value
    pub value: String,
}

/// Launch year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Year(u32);

impl Year {
    /// Accept positive years
    pub fn create(value: i64) -> Either<Self, InvalidYearError> {
        match u32::try_from(value) {
            Ok(year) if year > 0 => Either::ok(Year(year)),
            _ => Either::fail(InvalidYearError(value)),
        }
    }

    /// Raw year
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Year {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Year::create(value)
            .into_result()
            .map_err(serde::de::Error::custom)
    }
}

/// Duration in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Minutes(u32);

impl Minutes {
    /// Accept positive durations
    pub fn create(value: i64) -> Either<Self, InvalidMinutesError> {
        match u32::try_from(value) {
            Ok(minutes) if minutes > 0 => Either::ok(Minutes(minutes)),
            _ => Either::fail(InvalidMinutesError(value)),
        }
    }

    /// Raw minutes
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Minutes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Minutes::create(value)
            .into_result()
            .map_err(serde::de::Error::custom)
    }
}

/// Age classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    /// All audiences
    Free,
    /// 10 and over
    Age10,
    /// 12 and over
    Age12,
    /// 14 and over
    Age14,
    /// 16 and over
    Age16,
    /// 18 and over
    Age18,
}

impl Rating {
    /// Wire codes in classification order
    pub const CODES: [&'static str; 6] = ["L", "10", "12", "14", "16", "18"];

    /// Parse a wire code
    pub fn create(value: &str) -> Either<Self, InvalidRatingError> {
        match value {
            "L" => Either::ok(Rating::Free),
            "10" => Either::ok(Rating::Age10),
            "12" => Either::ok(Rating::Age12),
            "14" => Either::ok(Rating::Age14),
            "16" => Either::ok(Rating::Age16),
            "18" => Either::ok(Rating::Age18),
            other => Either::fail(InvalidRatingError {
                value: other.to_string(),
            }),
        }
    }

    /// Wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Free => "L",
            Rating::Age10 => "10",
            Rating::Age12 => "12",
            Rating::Age14 => "14",
            Rating::Age16 => "16",
            Rating::Age18 => "18",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Rating::create(&value)
            .into_result()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0)]
    #[test_case(-1)]
    fn test_invalid_year(value: i64) {
        let (year, error) = Year::create(value).as_array();
        assert!(year.is_none());
        assert_eq!(
            error.unwrap().to_string(),
            format!("The year must be a positive integer, passed value: {value}")
        );
    }

    #[test]
    fn test_valid_year_and_minutes() {
        assert_eq!(Year::create(2000).ok_value().map(Year::value), Some(2000));
        assert_eq!(Minutes::create(90).ok_value().map(Minutes::value), Some(90));
        assert!(Minutes::create(0).is_fail());
    }

    #[test_case("L", Rating::Free)]
    #[test_case("10", Rating::Age10)]
    #[test_case("18", Rating::Age18)]
    fn test_rating_codes(code: &str, rating: Rating) {
        assert_eq!(Rating::create(code), Either::ok(rating));
        assert_eq!(rating.to_string(), code);
    }

    #[test]
    fn test_invalid_rating_lists_known_values() {
        let error = Rating::create("20").fail_value().cloned().unwrap();
        assert_eq!(
            error.to_string(),
            "The rating must be one of the following values: L, 10, 12, 14, 16, 18, passed value: 20"
        );
    }

    #[test]
    fn test_rating_serializes_as_code() {
        let json = serde_json::to_value(Rating::Age14).unwrap();
        assert_eq!(json, serde_json::json!("14"));
        assert!(serde_json::from_value::<Rating>(serde_json::json!("X")).is_err());
    }
}
