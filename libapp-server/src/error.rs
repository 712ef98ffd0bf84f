//! Mapping of catalog errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use libapp_core::LibraryError;
use serde::Serialize;

/// Error returned by the API handlers
#[derive(Debug)]
pub enum ApiError {
    /// A catalog operation failed
    Library(LibraryError),

    /// The request body passed parsing but not validation
    Validation(String),

    /// The request could not be carried out, e.g. a worker task panicked
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        Self::Library(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Library(err) => match &err {
                LibraryError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
                LibraryError::AlreadyExists(msg) => (StatusCode::CONFLICT, msg.clone()),
                LibraryError::Unavailable(msg) => (StatusCode::CONFLICT, msg.clone()),
                LibraryError::Storage(e) => {
                    tracing::error!("Catalog storage failure: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(msg) => {
                tracing::error!("{}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use libapp_core::StorageError;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_table() {
        assert_eq!(
            status_of(LibraryError::NotFound("x".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(LibraryError::AlreadyExists("x".into()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(LibraryError::Unavailable("x".into()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(LibraryError::Storage(StorageError::Malformed("x".into())).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ApiError::Validation("x".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(ApiError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
