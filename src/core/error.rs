//! Typed error handling for the coursebook API
//!
//! Two layers:
//!
//! - [`StoreError`]: the tagged failure a persistence collaborator returns
//!   from create/update operations. Callers inspect the variant instead of
//!   catching and rethrowing exceptions.
//! - [`ApiError`]: the HTTP-facing error. Validation and uniqueness
//!   failures normalize to `400 { "errors": [...] }` with message order
//!   preserved; every other store failure propagates and surfaces as a
//!   generic 500 at this outer boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;
use thiserror::Error;

/// Failure raised by a persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// One or more field-level constraint violations.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// A uniqueness constraint was violated.
    #[error("uniqueness conflict: {}", .0.join(", "))]
    Conflict(Vec<String>),

    /// Anything else (store unavailable, integrity fault, ...).
    /// Not handled locally; surfaced by the outer boundary.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The error type returned by request handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Normalized validation/uniqueness failure list.
    Validation(Vec<String>),

    /// 400 with a fixed message. Single-course lookup misses respond with
    /// this status rather than 404; the inconsistency is observed behavior
    /// kept intact.
    BadRequest(String),

    /// Resource absent on a mutating route.
    NotFound(String),

    /// Authenticated but not the owner.
    Forbidden(String),

    /// Missing or unverifiable credentials.
    Unauthorized,

    /// Unhandled failure; the cause is logged, never sent to the client.
    Internal(anyhow::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => {
                write!(f, "validation failed: {}", errors.join(", "))
            }
            ApiError::BadRequest(message) => write!(f, "{}", message),
            ApiError::NotFound(message) => write!(f, "{}", message),
            ApiError::Forbidden(message) => write!(f, "{}", message),
            ApiError::Unauthorized => write!(f, "Access Denied"),
            ApiError::Internal(cause) => write!(f, "internal error: {}", cause),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            ApiError::Validation(errors) => serde_json::json!({ "errors": errors }),
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::Forbidden(message) => serde_json::json!({ "message": message }),
            ApiError::Unauthorized => serde_json::json!({ "message": "Access Denied" }),
            ApiError::Internal(_) => {
                serde_json::json!({ "message": "Internal server error" })
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(cause) = &self {
            tracing::error!(error = %cause, "request failed");
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) | StoreError::Conflict(errors) => {
                ApiError::Validation(errors)
            }
            StoreError::Other(cause) => ApiError::Internal(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_returns_400() {
        let err = ApiError::Validation(vec!["Title is required".to_string()]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_returns_404() {
        let err = ApiError::NotFound("Course not found!".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_lookup_miss_returns_400() {
        let err = ApiError::BadRequest("Course not found!".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_forbidden_returns_403() {
        let err = ApiError::Forbidden("You don't have access to update this course".to_string());
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_unauthorized_returns_401() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_returns_500_with_generic_body() {
        let err = ApiError::Internal(anyhow::anyhow!("connection refused"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = err.body();
        assert_eq!(body["message"], "Internal server error");
        assert!(!body.to_string().contains("connection refused"));
    }

    #[test]
    fn test_validation_body_preserves_message_order() {
        let err = ApiError::Validation(vec![
            "Title is required".to_string(),
            "Description is required".to_string(),
        ]);
        let body = err.body();
        assert_eq!(
            body,
            serde_json::json!({
                "errors": ["Title is required", "Description is required"]
            })
        );
    }

    #[test]
    fn test_store_validation_maps_to_api_validation() {
        let err: ApiError = StoreError::Validation(vec!["Title is required".to_string()]).into();
        assert!(matches!(err, ApiError::Validation(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_store_conflict_maps_to_api_validation() {
        let err: ApiError =
            StoreError::Conflict(vec!["Email address must be unique".to_string()]).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body(),
            serde_json::json!({ "errors": ["Email address must be unique"] })
        );
    }

    #[test]
    fn test_store_other_propagates_as_internal() {
        let err: ApiError = StoreError::Other(anyhow::anyhow!("boom")).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_store_error_display_joins_messages() {
        let err = StoreError::Validation(vec![
            "Title is required".to_string(),
            "Description is required".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: Title is required, Description is required"
        );
    }
}
