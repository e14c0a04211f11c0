use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Failures the dispatcher does not turn into a response itself
///
/// Under Lambda these propagate to the runtime as an invocation error. The
/// local server renders them as JSON through `IntoResponse`.
#[derive(Debug)]
pub enum DispatchError {
    /// Create body is not valid JSON
    MalformedBody(serde_json::Error),
    /// Create body parsed but does not have the expected shape
    InvalidBody(String),
    /// The key-value store call failed
    Store(anyhow::Error),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::MalformedBody(err) => write!(f, "JSON parse error: {}", err),
            DispatchError::InvalidBody(msg) => write!(f, "Invalid request body: {}", msg),
            DispatchError::Store(err) => write!(f, "Database error: {:#}", err),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::MalformedBody(err) => Some(err),
            DispatchError::InvalidBody(_) => None,
            DispatchError::Store(err) => Some(&**err),
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = match self {
            DispatchError::MalformedBody(_) | DispatchError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            DispatchError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for DispatchError {
    fn from(err: anyhow::Error) -> Self {
        DispatchError::Store(err)
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        DispatchError::MalformedBody(err)
    }
}
