use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use recordstore_core::{RecordValidationError, RepoError};
use serde::Serialize;
use thiserror::Error;

pub const STATUS_ERROR: &str = "ERROR";

/// Stable error taxonomy exposed to HTTP callers.
///
/// Store failures are logged where they are converted and reach the client
/// only as `StoreUnavailable` with a fixed message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] RecordValidationError),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("record store unavailable")]
    StoreUnavailable,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::MalformedPayload(_) => "malformed_payload",
            ApiError::StoreUnavailable => "store_unavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Logs an internal failure and collapses it into `StoreUnavailable`.
    pub fn store_failure(source: &str, err: impl std::fmt::Display) -> Self {
        error!("event=store_failure module=http status=error source={source} error={err}");
        ApiError::StoreUnavailable
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Validation(invalid) => ApiError::Validation(invalid),
            other => ApiError::store_failure("repository", other),
        }
    }
}

#[derive(Serialize)]
struct ErrorEnvelope {
    status: &'static str,
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope {
            status: STATUS_ERROR,
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
            },
        };

        (self.status(), Json(body)).into_response()
    }
}
