//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use lectern_core::error::{AppError, ErrorKind};

/// Handler result type; `?` lifts any `AppError` into an HTTP response.
pub type ApiResult<T> = Result<T, ApiError>;

/// Newtype over `AppError` carrying the HTTP mapping.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            _ => {
                tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message: if status == StatusCode::INTERNAL_SERVER_ERROR {
                // Internal failure details stay in the logs.
                "Internal server error".to_string()
            } else {
                err.message
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_message() {
        let response = ApiError(AppError::validation("Display name cannot be empty"));
        let body = match &response.0.kind {
            ErrorKind::Validation => response.0.message.clone(),
            _ => unreachable!(),
        };
        assert_eq!(body, "Display name cannot be empty");
    }

    #[test]
    fn status_mapping() {
        let cases = [
            (AppError::validation("v"), StatusCode::BAD_REQUEST),
            (AppError::authentication("a"), StatusCode::UNAUTHORIZED),
            (AppError::authorization("f"), StatusCode::FORBIDDEN),
            (AppError::not_found("n"), StatusCode::NOT_FOUND),
            (AppError::conflict("c"), StatusCode::CONFLICT),
            (AppError::internal("i"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
