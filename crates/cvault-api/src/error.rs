//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cvault_catalog::CatalogError;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Machine-checkable error kind carried on the wire next to the
    /// human-readable detail.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal",
            ApiError::Catalog(e) => e.code(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Catalog(e) => match e {
                CatalogError::Validation(_)
                | CatalogError::NewNameRequired
                | CatalogError::NotInRecycleBin(_)
                | CatalogError::Codec(_) => StatusCode::BAD_REQUEST,
                CatalogError::ReservedFolder(_) => StatusCode::FORBIDDEN,
                CatalogError::FolderAlreadyExists(_)
                | CatalogError::FolderNotEmpty(_)
                | CatalogError::NoOpMove
                | CatalogError::DestinationConflict(_) => StatusCode::CONFLICT,
                CatalogError::Storage(cvault_storage::StorageError::NotFound(_)) => {
                    StatusCode::NOT_FOUND
                }
                CatalogError::PartialApplication { .. }
                | CatalogError::PartialRename { .. }
                | CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose storage/internal error details in production
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR
            && std::env::var("ENVIRONMENT").unwrap_or_default() == "production"
        {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            detail,
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_to_stable_codes_and_statuses() {
        let err = ApiError::from(CatalogError::NoOpMove);
        assert_eq!(err.code(), "no_op_move");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = ApiError::from(CatalogError::ReservedFolder("Recycle Bin".to_string()));
        assert_eq!(err.code(), "reserved_folder");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err = ApiError::from(CatalogError::NewNameRequired);
        assert_eq!(err.code(), "new_name_required");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
