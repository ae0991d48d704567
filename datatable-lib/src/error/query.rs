//! Server page protocol errors

use thiserror::Error;

/// Errors raised while building page requests or decoding page responses.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The response body does not match the page response shape.
    #[error("failed to decode page response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The base URL the request is appended to could not be parsed.
    #[error("invalid base url: {0}")]
    Url(#[from] url::ParseError),
}
