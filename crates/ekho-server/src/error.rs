use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use ekho_core::error::ValidationError;
use ekho_render::error::RenderError;

/// Unified API error type for all route handlers.
///
/// Validation failures surface field-level detail to the caller; engine
/// failures are reported as a generic message without internal detail.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    BadRequest(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "invalid report payload".to_string(),
                    details: Some(e.to_string()),
                },
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    details: None,
                },
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "report rendering failed".to_string(),
                    details: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::UnknownTheme(theme) => {
                ApiError::BadRequest(format!("unknown theme: {theme}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
