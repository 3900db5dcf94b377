//! Field-level request validation shared by the handlers.
//!
//! Every rejection is `400 invalid_request` with `details` naming the field,
//! a stable `code`, and for some failures the offending `value` or `index`.

use std::fmt::Display;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::Error;

/// Name of a request field as the client spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

/// Why a field was rejected, with whatever locates the fault.
enum Reason<'a> {
    Missing,
    NotUuid { value: &'a str },
    Invalid,
    InvalidElement { index: usize },
}

impl Reason<'_> {
    fn details(&self, field: FieldName) -> Value {
        let mut details = Map::new();
        details.insert("field".to_owned(), field.0.into());
        let code = match self {
            Self::Missing => "missing_field",
            Self::NotUuid { value } => {
                details.insert("value".to_owned(), (*value).into());
                "invalid_uuid"
            }
            Self::Invalid => "invalid_value",
            Self::InvalidElement { index } => {
                details.insert("index".to_owned(), (*index).into());
                "invalid_value"
            }
        };
        details.insert("code".to_owned(), code.into());
        Value::Object(details)
    }
}

fn reject(field: FieldName, reason: Reason<'_>, message: String) -> Error {
    Error::invalid_request(message).with_details(reason.details(field))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    reject(field, Reason::Missing, format!("missing required field: {}", field.0))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    reject(
        field,
        Reason::NotUuid { value },
        format!("{} must be a valid UUID", field.0),
    )
}

/// Reject `field` with the message of the domain validation error `err`.
pub(crate) fn invalid_field_error(field: FieldName, err: impl Display) -> Error {
    reject(field, Reason::Invalid, format!("{}: {err}", field.0))
}

/// Reject element `index` of the list `field`.
pub(crate) fn invalid_element_error(field: FieldName, index: usize, err: impl Display) -> Error {
    reject(
        field,
        Reason::InvalidElement { index },
        format!("{}[{index}]: {err}", field.0),
    )
}

/// A required UUID parameter; surrounding whitespace is ignored.
pub(crate) fn parse_uuid(value: Option<String>, field: FieldName) -> Result<Uuid, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    Uuid::parse_str(raw.trim()).map_err(|_| invalid_uuid_error(field, &raw))
}
