//! HTTP API handlers for rollcall-at

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rollcall_common::Error;
use serde_json::json;
use tracing::error;

pub mod attendance;
pub mod enrollees;
pub mod health;
pub mod register;

pub use attendance::attendance_by_course;
pub use enrollees::{list_enrollees, update_enrollee};
pub use health::health_routes;
pub use register::register_attendance;

/// Wrapper mapping the shared error taxonomy onto HTTP responses.
///
/// Status contract: missing/invalid input 400, unknown resource 404,
/// anything else 500. Bodies are `{"error": "<message>"}`.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::MissingInput | Error::InvalidIdentity => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => {
                error!("Request failed: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
