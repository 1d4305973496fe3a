//! Request/reply protocol of the search service.
//!
//! This module holds everything between a raw frame arriving on the inbound socket and the
//! reply written back to it: decoding and validation, routing by action, the round trip to the
//! data-storage service and the server loop that ties them together.
//!
//! # Overview
//!
//! The service sits on two ZeroMQ request/reply channels. Callers reach it through a REP socket;
//! it reaches the data-storage service through a REQ socket. Both channels allow exactly one
//! outstanding request, so the server handles one request fully, downstream call included,
//! before it reads the next.
//!
//! All frames are UTF-8 JSON objects.
//!
//! # Key Components
//!
//! - [`Request`]: Typed inbound request, one variant per action. Built by [`Request::from_frame`]
//!   after [`validate`] has checked the fields routing needs.
//! - [`Router`]: Maps a [`Request`] to its handler.
//! - [`DownstreamClient`]: Blocking `select` round trip to the data-storage service.
//! - [`Response`]: Reply sent for every request, `success` with a page of rows or `error` with a
//!   message.
//! - [`SearchServer`]: Owns both channels and runs the receive, handle, reply loop.
//! - [`ProtocolTransport`]: JSON framing over any [`Channel`].
//!
//! # Wire Format
//!
//! - Inbound: `{"action": "search", "table": "users", "filters": {}, "page": 1, "page_size": 10}`
//! - Success: `{"status": "success", "data": [...], "pagination": {"page", "page_size",
//!   "total_records", "total_pages"}}`
//! - Error: `{"status": "error", "message": "..."}`
//! - Downstream query: `{"action": "select", "table": "users", "filters": {}}`, answered with
//!   `{"status": "success", "data": {"rows": [...]}}`.
//!
//! # Failure Handling
//!
//! Decode, validation, routing and downstream failures are all caught once in
//! [`SearchServer::handle`] and turned into an error [`Response`], so a request is never left
//! unanswered. Nothing is retried. A bounded downstream wait surfaces as
//! `Database service timed out`.
//!
//! # See Also
//!
//! - [`pagination`](crate::pagination): Slices the rows returned by the data-storage service.
mod downstream;
mod request;
mod response;
mod router;
mod server;
mod transport;

pub use downstream::{
    DownstreamAction, DownstreamClient, DownstreamData, DownstreamError, DownstreamRequest,
    DownstreamResponse,
};
pub use request::{Action, Request, SearchRequest, ValidationError, validate};
pub use response::Response;
pub use router::Router;
pub use server::SearchServer;
pub use transport::{Channel, ProtocolTransport, TransportError, socket_timeout};
