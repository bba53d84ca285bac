//! Error type for the Neon API client.

use thiserror::Error;

/// Errors from the Neon API client.
#[derive(Debug, Error)]
pub enum NeonError {
    /// The request never completed (DNS, TLS, connect, read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A non-2xx status on an operation that propagates API failures.
    #[error("api error ({status}): {body}")]
    Api { status: u16, body: String },

    /// A 2xx response whose body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API key could not be encoded as a header value.
    #[error("invalid api key: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}
