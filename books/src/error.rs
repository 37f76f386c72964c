//! Error type for book store operations.
//!
//! # Design
//! `IndexOutOfRange` is returned as a typed 404 rather than escaping as an
//! unhandled fault, so clients can tell a bad index from a server failure.
//! `MissingBookName` covers requests where neither the query string nor a
//! JSON body carried `book_name`. `InvalidIndex` is a path segment that is not
//! an integer. Every variant renders as `{"detail": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use utoipa::ToSchema;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookError {
    /// The index does not name an element of the current list.
    #[error("book index {index} out of range for {len} books")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("book_name is required: {0}")]
    MissingBookName(String),

    #[error("book index must be an integer: {0}")]
    InvalidIndex(String),
}

impl BookError {
    pub fn status(&self) -> StatusCode {
        match self {
            BookError::IndexOutOfRange { .. } => StatusCode::NOT_FOUND,
            BookError::MissingBookName(_) | BookError::InvalidIndex(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for BookError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();
        warn!(status = status.as_u16(), %detail, "book request rejected");
        (status, Json(ErrorBody { detail })).into_response()
    }
}
