//! Failures raised while handling a single request.
//!
//! Every variant is caught at the server loop and sent back to the caller as an error reply, so
//! the `Display` text of each variant is exactly the `message` the caller sees.
use thiserror::Error;

use crate::protocol::{DownstreamError, TransportError, ValidationError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to decode request: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to decode request: expected a JSON object")]
    NotAnObject,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("{0}")]
    Downstream(#[from] DownstreamError),

    #[error("{0}")]
    Transport(#[from] TransportError),
}
