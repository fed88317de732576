//! Mapping of domain errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use ferrum_domain as domain;

/// Error surface of the HTTP handlers. Domain errors are flattened into
/// response categories, each carrying a stable code and a status.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Unavailable(_) => "STORE_UNAVAILABLE",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    fn from_validation(error: &domain::ValidationError) -> Self {
        match error {
            domain::ValidationError::Conflict(_) => ApiError::Conflict(error.to_string()),
            _ => ApiError::Validation(error.to_string()),
        }
    }

    fn from_storage(error: &domain::StorageError) -> Self {
        match error {
            domain::StorageError::Rejected(_) => ApiError::Conflict(error.to_string()),
            _ => ApiError::Unavailable(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({"error": {"code": self.code(), "message": self.to_string()}});
        (self.status(), Json(body)).into_response()
    }
}

impl From<domain::ReadError> for ApiError {
    fn from(value: domain::ReadError) -> Self {
        match value {
            domain::ReadError::Validation(error) => Self::from_validation(&error),
            domain::ReadError::Authorization(error) => ApiError::Forbidden(error.to_string()),
            domain::ReadError::NotFound(error) => ApiError::NotFound(error.to_string()),
            domain::ReadError::Storage(error) => Self::from_storage(&error),
            domain::ReadError::Other(error) => ApiError::Internal(error.to_string()),
        }
    }
}

impl From<domain::CreateError> for ApiError {
    fn from(value: domain::CreateError) -> Self {
        match value {
            domain::CreateError::Validation(error) => Self::from_validation(&error),
            domain::CreateError::Authorization(error) => ApiError::Forbidden(error.to_string()),
            domain::CreateError::NotFound(error) => ApiError::NotFound(error.to_string()),
            domain::CreateError::Storage(error) => Self::from_storage(&error),
            domain::CreateError::Other(error) => ApiError::Internal(error.to_string()),
        }
    }
}

impl From<domain::DeleteError> for ApiError {
    fn from(value: domain::DeleteError) -> Self {
        match value {
            domain::DeleteError::Validation(error) => Self::from_validation(&error),
            domain::DeleteError::Authorization(error) => ApiError::Forbidden(error.to_string()),
            domain::DeleteError::NotFound(error) => ApiError::NotFound(error.to_string()),
            domain::DeleteError::Storage(error) => Self::from_storage(&error),
            domain::DeleteError::Other(error) => ApiError::Internal(error.to_string()),
        }
    }
}

impl From<domain::NameError> for ApiError {
    fn from(value: domain::NameError) -> Self {
        ApiError::Validation(value.to_string())
    }
}

impl From<domain::EmailError> for ApiError {
    fn from(value: domain::EmailError) -> Self {
        ApiError::Validation(value.to_string())
    }
}
