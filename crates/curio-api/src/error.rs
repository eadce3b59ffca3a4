//! API error mapping.
//!
//! Database and provider internals never reach the client: they are logged
//! here and replaced with a generic message. Informational outcomes
//! (not-found on unsave, not-bookmarked) are not errors and never pass
//! through this type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use tracing::error;

/// Error type returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    Internal(curio_core::Error),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    /// Search provider failure, surfaced as a failed search.
    SearchFailed(String),
}

impl From<curio_core::Error> for ApiError {
    fn from(err: curio_core::Error) -> Self {
        match err {
            curio_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            curio_core::Error::ArticleNotFound(url) => {
                ApiError::NotFound(format!("Article not found: {}", url))
            }
            curio_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            curio_core::Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            curio_core::Error::Forbidden(msg) => ApiError::Forbidden(msg),
            curio_core::Error::Conflict(msg) => ApiError::Conflict(msg),
            curio_core::Error::Search(msg) => ApiError::SearchFailed(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(err) => {
                error!(
                    subsystem = "api",
                    error = %err,
                    "Request failed with internal error"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::SearchFailed(msg) => {
                error!(subsystem = "api", error = %msg, "Search provider failure");
                (StatusCode::BAD_GATEWAY, "Search failed".to_string())
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_not_found_maps_to_404() {
        let err: ApiError =
            curio_core::Error::ArticleNotFound("https://example.com".to_string()).into();
        match err {
            ApiError::NotFound(msg) => assert!(msg.contains("https://example.com")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_database_error_maps_to_internal() {
        let err: ApiError = curio_core::Error::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_search_error_maps_to_search_failed() {
        let err: ApiError = curio_core::Error::Search("down".to_string()).into();
        assert!(matches!(err, ApiError::SearchFailed(_)));
    }

    #[test]
    fn test_internal_error_body_is_generic() {
        let response =
            ApiError::Internal(curio_core::Error::Internal("secret detail".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
