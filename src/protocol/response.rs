use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::ServiceError, pagination::Pagination};

/// Reply sent for every inbound request, tagged by `status` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Success {
        data: Vec<Value>,
        pagination: Pagination,
    },
    Error {
        message: String,
    },
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }
}

impl From<&ServiceError> for Response {
    fn from(value: &ServiceError) -> Self {
        Response::Error {
            message: value.to_string(),
        }
    }
}
