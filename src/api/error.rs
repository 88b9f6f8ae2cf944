//! API error handling.
//!
//! Every failure the service models is a client error rendered as
//! `{"message": "..."}` with a 400 or 404 status.

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::RepositoryError;

/// Message returned when a create or update carries no usable text.
pub const TEXT_REQUIRED_MESSAGE: &str = "Text is required";

// =============================================================================
// Error Response Body
// =============================================================================

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub message: String,
}

// =============================================================================
// ApiError
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{entity_type} not found")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The request body could not be read as the expected JSON.
    #[error("{0}")]
    MalformedBody(String),
}

impl ApiError {
    #[must_use]
    pub fn todo_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Todo",
            identifier: identifier.into(),
        }
    }

    #[must_use]
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    #[must_use]
    pub fn text_required() -> Self {
        Self::validation_field("text", TEXT_REQUIRED_MESSAGE)
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    #[must_use]
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotFound {
                entity_type,
                identifier,
            } => tracing::debug!(entity_type, %identifier, "Responding with not found"),
            Self::Validation { message, field } => {
                tracing::debug!(field = field.as_deref(), %message, "Responding with validation error");
            }
            Self::MalformedBody(message) => {
                tracing::debug!(%message, "Responding with malformed body error");
            }
        }
        (self.status_code(), Json(self.to_error_response())).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(identifier) => Self::todo_not_found(identifier),
            // The only invariant the store enforces is non-empty text.
            RepositoryError::InvalidInput(_) => Self::text_required(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

// =============================================================================
// JSON Extractor
// =============================================================================

/// `Json` extractor whose rejections render as [`ApiError`].
///
/// Keeps malformed bodies on the same `{"message"}` contract as every other
/// failure instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

// =============================================================================
// Tests
// =============================================================================
