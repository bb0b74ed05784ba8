//! JSON error responses for the API.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use leadhunter_core::{FieldError, InvalidSearchParams};
use serde::Serialize;

pub const INVALID_SEARCH_MESSAGE: &str = "Invalid search parameters";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Errors returned by API handlers.
///
/// Client errors carry field-level details. Server errors carry a fixed
/// message only; the cause is logged where it happens.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}: {} field error(s)", errors.len())]
    BadRequest {
        message: &'static str,
        errors: Vec<FieldError>,
    },

    #[error("{message}")]
    Internal { message: &'static str },
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
}

impl ApiError {
    /// Search body could not be decoded.
    pub fn invalid_search_body(rejection: &JsonRejection) -> Self {
        Self::BadRequest {
            message: INVALID_SEARCH_MESSAGE,
            errors: vec![body_error(rejection)],
        }
    }

    /// Export body could not be decoded.
    pub fn invalid_body(rejection: &JsonRejection) -> Self {
        Self::BadRequest {
            message: INVALID_BODY_MESSAGE,
            errors: vec![body_error(rejection)],
        }
    }

    pub fn internal(message: &'static str) -> Self {
        Self::Internal { message }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn body_error(rejection: &JsonRejection) -> FieldError {
    FieldError::new("body", rejection.body_text())
}

impl From<InvalidSearchParams> for ApiError {
    fn from(err: InvalidSearchParams) -> Self {
        Self::BadRequest {
            message: INVALID_SEARCH_MESSAGE,
            errors: err.errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::BadRequest { message, errors } => ErrorBody {
                message,
                errors: Some(errors.as_slice()),
            },
            ApiError::Internal { message } => ErrorBody {
                message,
                errors: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
