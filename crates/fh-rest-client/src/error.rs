//! Error types for the REST API client

use fh_rest_api_contract::ProblemDetails;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the task service
#[derive(Debug, Error)]
pub enum RestClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Server returned error status {status}: {details:?}")]
    ServerError {
        status: StatusCode,
        details: ProblemDetails,
    },

    #[error("Unexpected response format (status {status}): {body}")]
    UnexpectedResponse { status: StatusCode, body: String },

    #[error("Operation not available on this service build: {0}")]
    Unsupported(&'static str),
}

/// Result type alias for REST client operations
pub type RestClientResult<T> = Result<T, RestClientError>;
