use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Rejected client input. Nothing is written when one of these is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("field must not be empty: {0}")]
    EmptyField(&'static str),

    #[error("invalid dob {0:?}: expected a date in YYYY-MM-DD format")]
    InvalidDate(String),

    #[error("invalid request body: {0}")]
    MalformedBody(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Student not found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store failure while creating or updating; reported to the client as a 400.
    #[error("{0}")]
    WriteRejected(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::WriteRejected(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn write_rejected(e: anyhow::Error) -> Self {
        ApiError::WriteRejected(format!("{e:#}"))
    }

    pub fn internal(e: anyhow::Error) -> Self {
        ApiError::Internal(format!("{e:#}"))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_uses_fixed_message() {
        assert_eq!(ApiError::NotFound.to_string(), "Student not found");
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_is_a_client_error() {
        let err = ApiError::from(ValidationError::MissingField("first_name"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "missing required field: first_name");
    }

    #[test]
    fn write_failures_stay_client_errors() {
        let err = ApiError::write_rejected(anyhow::anyhow!("value too long"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let err = ApiError::internal(anyhow::anyhow!("pool closed"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
