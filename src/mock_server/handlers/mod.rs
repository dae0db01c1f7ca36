//! HTTP request handlers for the mock server.

pub mod instances;
pub mod messages;

pub use instances::*;
pub use messages::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Error body in the shape the Evolution API uses.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "response": { "message": [message.into()] }
        })),
    )
        .into_response()
}

pub(crate) fn unauthorized() -> Response {
    error_response(StatusCode::UNAUTHORIZED, "Unauthorized")
}

pub(crate) fn instance_not_found(name: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("The \"{name}\" instance does not exist"),
    )
}
