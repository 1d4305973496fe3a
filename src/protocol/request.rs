use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    error::ServiceError,
    pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE},
};

/// Reasons a decoded request is refused before dispatch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing action field")]
    MissingAction,

    #[error("missing table name")]
    MissingTable,

    #[error("{0} must be a string")]
    NotAString(&'static str),

    #[error("{0} must be an integer")]
    NotAnInteger(&'static str),

    #[error("filters must be an object")]
    FiltersNotAnObject,
}

/// Actions the service knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Search,
}

impl FromStr for Action {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(Action::Search),
            other => Err(ServiceError::UnknownAction(other.to_string())),
        }
    }
}

/// Arguments of a `search` request, with defaults already applied.
///
/// `page` and `page_size` hold what the caller asked for; clamping happens when the rows are
/// paginated.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub table: String,
    pub filters: Map<String, Value>,
    pub page: i64,
    pub page_size: i64,
}

/// A validated inbound request, one variant per action.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Search(SearchRequest),
}

/// Check that `request` carries the fields needed before it can be routed.
///
/// Only `search` has action-specific requirements. Other actions pass untouched and are
/// rejected when the action tag is resolved.
pub fn validate(request: &Map<String, Value>) -> Result<(), ValidationError> {
    let action = request.get("action").ok_or(ValidationError::MissingAction)?;

    if action.as_str() == Some("search") && !request.contains_key("table") {
        return Err(ValidationError::MissingTable);
    }

    Ok(())
}

impl Request {
    /// Decode a raw wire frame into a typed request.
    pub fn from_frame(frame: &[u8]) -> Result<Self, ServiceError> {
        let value: Value = serde_json::from_slice(frame)?;
        let Value::Object(fields) = value else {
            return Err(ServiceError::NotAnObject);
        };

        fields.try_into()
    }
}

impl TryFrom<Map<String, Value>> for Request {
    type Error = ServiceError;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        validate(&fields)?;

        let action = match fields.get("action") {
            Some(Value::String(action)) => action.parse::<Action>()?,
            Some(other) => return Err(ServiceError::UnknownAction(other.to_string())),
            None => return Err(ValidationError::MissingAction.into()),
        };

        match action {
            Action::Search => {
                let table = string_field(&fields, "table")?
                    .ok_or(ValidationError::MissingTable)?
                    .to_string();

                let filters = match fields.remove("filters") {
                    None | Some(Value::Null) => Map::new(),
                    Some(Value::Object(filters)) => filters,
                    Some(_) => return Err(ValidationError::FiltersNotAnObject.into()),
                };

                Ok(Request::Search(SearchRequest {
                    table,
                    filters,
                    page: integer_field(&fields, "page")?.unwrap_or(DEFAULT_PAGE),
                    page_size: integer_field(&fields, "page_size")?.unwrap_or(DEFAULT_PAGE_SIZE),
                }))
            }
        }
    }
}

fn string_field<'a>(
    fields: &'a Map<String, Value>,
    name: &'static str,
) -> Result<Option<&'a str>, ValidationError> {
    match fields.get(name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ValidationError::NotAString(name)),
    }
}

/// Integers may arrive as JSON numbers or as strings holding a number.
///
/// Fractions are truncated toward zero and out-of-range values saturate, leaving the final say
/// to pagination clamping.
fn integer_field(
    fields: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<i64>, ValidationError> {
    let value = match fields.get(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i128>()
            .ok()
            .map(|v| v.clamp(i64::MIN.into(), i64::MAX.into()) as i64),
        Some(_) => None,
    };

    value.map(Some).ok_or(ValidationError::NotAnInteger(name))
}
