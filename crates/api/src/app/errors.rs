use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use vendorhub_analytics::AnalyticsError;
use vendorhub_core::DomainError;
use vendorhub_infra::{ConnectionServiceError, StoreError};

/// Client errors become 400; collaborator failures become 503. No partial
/// data is ever returned alongside.
pub fn analytics_error_to_response(err: AnalyticsError) -> axum::response::Response {
    match err {
        AnalyticsError::InvalidArgument(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_argument", msg),
        AnalyticsError::UpstreamUnavailable(msg) => {
            tracing::error!(error = %msg, "recommendation upstream unavailable");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable", msg)
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = match &err {
        DomainError::Validation(_) | DomainError::InvalidId(_) => StatusCode::BAD_REQUEST,
        DomainError::InvariantViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::NotParty(_) => StatusCode::FORBIDDEN,
    };
    json_error(status, err.code(), err.to_string())
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Concurrency { .. } => json_error(StatusCode::CONFLICT, "conflict", err.to_string()),
        StoreError::LockPoisoned(_) => {
            tracing::error!(error = %err, "store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", err.to_string())
        }
    }
}

pub fn connection_error_to_response(err: ConnectionServiceError) -> axum::response::Response {
    match err {
        ConnectionServiceError::Domain(e) => domain_error_to_response(e),
        ConnectionServiceError::Store(e) => store_error_to_response(e),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
