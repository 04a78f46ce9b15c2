//! Error-to-response mapping for the HTTP layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// HTTP status code, repeated in the body.
    pub code: u16,
    /// Client-facing message.
    pub message: String,
}

/// Wrapper mapping core errors onto HTTP responses.
///
/// Bad parameters surface their own message with a 400; anything else
/// is logged and answered with a generic 500 so internal state never
/// leaks to clients.
#[derive(Debug)]
pub struct ApiError(pub fanout_core::Error);

impl From<fanout_core::Error> for ApiError {
    fn from(err: fanout_core::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            fanout_core::Error::InvalidParameter { .. } => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            _ => {
                tracing::error!("task execution failed: {}", self.0);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        let body = ErrorBody {
            code: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
