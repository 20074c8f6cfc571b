//! Error types for the MOEX client library.

use thiserror::Error;

/// The main error type for all MOEX client operations.
#[derive(Error, Debug)]
pub enum MoexError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success status
    #[error("Request failed: {status} Path: {path} Body: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Request path including the query string
        path: String,
        /// Raw response body
        body: String,
    },

    /// The market has no endpoint on the exchange API
    #[error("Unknown market {0}")]
    UnknownMarket(String),

    /// Timeframe code outside the supported set
    #[error("Timeframe {0} is not supported")]
    UnsupportedTimeframe(String),

    /// Exchange interval code outside the supported set
    #[error("Exchange interval {0} is not supported")]
    UnsupportedInterval(u32),

    /// The response did not contain the expected dataset
    #[error("Dataset '{0}' missing from response")]
    MissingDataset(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// More pages arrived than the configured page cap allows
    #[error("Pagination exceeded the limit of {0} pages")]
    PageLimitExceeded(usize),

    /// Credential store failure
    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by a [`SecretStore`](crate::auth::SecretStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not be reached or refused access
    #[error("credential store unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected the stored value
    #[error("invalid credential value: {0}")]
    InvalidValue(String),
}

impl MoexError {
    /// Returns `true` for failures that come from the caller passing bad input
    /// rather than from the network or the exchange.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            MoexError::UnknownMarket(_)
                | MoexError::UnsupportedTimeframe(_)
                | MoexError::UnsupportedInterval(_)
        )
    }

    /// HTTP status code, when the failure was a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            MoexError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
