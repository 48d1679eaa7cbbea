//! Error types for the tasks API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant so a detail view can tell "the task
//! does not exist" from "the server returned an unexpected status." All
//! other non-2xx responses land in `HttpError` with the raw status code and
//! body, unchanged. Transport failures carry the transport's own message.
//!
//! A list envelope the client does not recognise is *not* an error; see
//! [`crate::envelope`].

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods, transports and `TodoApi`.
///
/// Every variant renders a non-empty message, which is what a failed
/// [`crate::fetch::FetchState`] carries.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 — the requested task does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The round trip itself failed (unreachable host, timeout, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A detail lookup was requested without an identifier.
    #[error("missing task identifier")]
    MissingId,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
