//! REST API handlers.

pub mod quote;

use axum::Json;
use axum::http::StatusCode;
use serde_json::{json, Value};

/// Standard error response.
pub fn err_json(status: u16, message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "status": "error", "error": message })),
    )
}
