//! Error types for the pokedex client.
//!
//! # Design
//! Two failure classes reach the state container: `Network` (the round-trip
//! itself failed) and `Decode` (the payload did not match the expected
//! shape). `Status` is only produced when the degrade policy is
//! `Surface`; under the default `Silent` policy a non-2xx response is
//! folded into an empty result by the client and never becomes an error.

use thiserror::Error;

/// Errors produced while fetching a resource.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connectivity, timeout, runtime shutdown.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request could not be built; nothing was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The fetch task panicked or was torn down before producing a result.
    #[error("fetch aborted: {0}")]
    Aborted(String),
}

impl ApiError {
    /// True for the transport class, which includes non-2xx statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Status { .. })
    }
}
