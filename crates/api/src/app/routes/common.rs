use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use vendorhub_core::{AgentId, ConnectionId, VendorId};

use crate::app::errors;
use crate::context::CallerContext;

pub fn require_vendor(caller: &CallerContext) -> Result<VendorId, axum::response::Response> {
    caller.vendor_id().cloned().ok_or_else(|| {
        errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "vendor identity required")
    })
}

pub fn require_agent(caller: &CallerContext) -> Result<AgentId, axum::response::Response> {
    caller.agent_id().cloned().ok_or_else(|| {
        errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "agent identity required")
    })
}

pub fn parse_connection_id(raw: &str) -> Result<ConnectionId, axum::response::Response> {
    raw.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid connection id"))
}

/// Unwrap a JSON body, turning axum's plain-text rejection into the API error shape.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, axum::response::Response> {
    body.map(|Json(value)| value).map_err(|rejection| {
        errors::json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
    })
}
