//! API error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use opexhub_shared::AppError;

/// Response wrapper around [`AppError`].
///
/// Repository errors convert into `AppError` at the db layer; this newtype
/// carries them through handler `?` and renders the JSON error body.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E: Into<AppError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

/// Shorthand for a 400 validation rejection.
pub(crate) fn validation(message: impl Into<String>) -> ApiError {
    ApiError(AppError::Validation(message.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError(AppError::PeriodLocked("202501".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let err = ApiError(AppError::NotFound("project".into()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = ApiError(AppError::Conflict("dup".into()));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
