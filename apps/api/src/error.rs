use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use guardpost_core::AppError;
use serde::Serialize;

/// Seconds a client waits before retrying while the console session loads.
pub const SESSION_LOADING_RETRY_AFTER_SECONDS: &str = "1";

/// API error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    message: String,
}

/// HTTP API errors.
#[derive(Debug)]
pub enum ApiError {
    /// Application error mapped by category.
    App(AppError),
    /// The console session is still being restored or signed in.
    SessionLoading,
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self::App(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = match self {
            Self::App(error) => error,
            Self::SessionLoading => {
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    [(header::RETRY_AFTER, SESSION_LOADING_RETRY_AFTER_SECONDS)],
                    Json(ErrorResponse {
                        message: "console session is still loading".to_owned(),
                    }),
                )
                    .into_response();
            }
        };

        let status = match error {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorResponse {
            message: error.to_string(),
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header};
    use axum::response::IntoResponse;
    use guardpost_core::AppError;

    use super::ApiError;

    #[test]
    fn app_errors_map_to_status_codes() {
        for (error, status) in [
            (
                AppError::Validation("bad".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Unauthorized("anonymous".to_owned()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::Forbidden("staff".to_owned()),
                StatusCode::FORBIDDEN,
            ),
        ] {
            assert_eq!(ApiError::from(error).into_response().status(), status);
        }
    }

    #[test]
    fn loading_session_asks_clients_to_retry() {
        let response = ApiError::SessionLoading.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.headers().contains_key(header::RETRY_AFTER));
    }
}
