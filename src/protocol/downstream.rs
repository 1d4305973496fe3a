use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::{Channel, ProtocolTransport, TransportError};

const SUCCESS: &str = "success";

/// The data-storage service could not produce rows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DownstreamError {
    #[error("Database service error")]
    Status,
    #[error("Database service timed out")]
    Timeout,
    #[error("Database service returned no rows")]
    MissingRows,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DownstreamAction {
    Select,
}

/// Query sent to the data-storage service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownstreamRequest {
    pub action: DownstreamAction,
    pub table: String,
    pub filters: Map<String, Value>,
}

impl DownstreamRequest {
    pub fn select(table: String, filters: Map<String, Value>) -> Self {
        Self {
            action: DownstreamAction::Select,
            table,
            filters,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DownstreamData {
    #[serde(default)]
    pub rows: Option<Vec<Value>>,
}

/// Reply from the data-storage service. Rows are opaque and passed through untouched.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DownstreamResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<DownstreamData>,
}

impl DownstreamResponse {
    pub fn into_rows(self) -> Result<Vec<Value>, DownstreamError> {
        if self.status != SUCCESS {
            return Err(DownstreamError::Status);
        }

        self.data
            .and_then(|data| data.rows)
            .ok_or(DownstreamError::MissingRows)
    }
}

/// Synchronous client for the data-storage service.
///
/// Each [`call`](Self::call) sends one query and blocks for its reply; there is never more than
/// one query in flight.
pub struct DownstreamClient<C: Channel> {
    transport: ProtocolTransport<C>,
}

impl<C: Channel> DownstreamClient<C> {
    pub fn new(channel: C) -> Self {
        Self {
            transport: ProtocolTransport::new(channel),
        }
    }

    pub fn call(&mut self, payload: &DownstreamRequest) -> Result<DownstreamResponse, TransportError> {
        self.transport.request(payload)
    }
}
