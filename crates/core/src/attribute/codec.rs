//! Pure conversions between domain scalars and attribute values.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use super::{AttributeValue, Item};

/// Errors raised while reading a typed value out of an item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Missing field: {field}")]
    Missing { field: String },
    #[error("Field {field} has type {found}, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Field {field} is not a valid number: {value}")]
    Malformed { field: String, value: String },
}

/// Encode a number as an `N` value.
pub fn number<T: Display>(value: T) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

/// Encode a string as an `S` value.
pub fn string(value: impl Into<String>) -> AttributeValue {
    AttributeValue::S(value.into())
}

/// Get a required string attribute.
pub fn get_string(item: &Item, key: &str) -> Result<String, CodecError> {
    get_optional_string(item, key)?.ok_or_else(|| CodecError::Missing {
        field: key.to_string(),
    })
}

/// Get an optional string attribute. Present with another type is an error.
pub fn get_optional_string(item: &Item, key: &str) -> Result<Option<String>, CodecError> {
    match item.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_s()
            .map(|s| Some(s.clone()))
            .map_err(|other| CodecError::WrongType {
                field: key.to_string(),
                expected: "S",
                found: other.type_name(),
            }),
    }
}

/// Get a required numeric attribute parsed into `T`.
pub fn get_number<T: FromStr>(item: &Item, key: &str) -> Result<T, CodecError> {
    get_optional_number(item, key)?.ok_or_else(|| CodecError::Missing {
        field: key.to_string(),
    })
}

/// Get an optional numeric attribute parsed into `T`.
pub fn get_optional_number<T: FromStr>(item: &Item, key: &str) -> Result<Option<T>, CodecError> {
    let Some(value) = item.get(key) else {
        return Ok(None);
    };

    let text = value.as_n().map_err(|other| CodecError::WrongType {
        field: key.to_string(),
        expected: "N",
        found: other.type_name(),
    })?;

    text.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| CodecError::Malformed {
            field: key.to_string(),
            value: text.clone(),
        })
}
