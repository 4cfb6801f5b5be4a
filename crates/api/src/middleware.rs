use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use vendorhub_core::{AgentId, VendorId};

use crate::app::errors;
use crate::context::CallerContext;

/// Vendor identity header set by the upstream gateway.
pub const VENDOR_HEADER: &str = "x-vendor-id";
/// Agent identity header set by the upstream gateway.
pub const AGENT_HEADER: &str = "x-agent-id";

/// Why identity headers could not be turned into a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallerRejection {
    /// Blank or non-UTF-8 value in the named header.
    Malformed(&'static str),
    /// Both a vendor and an agent identity were asserted.
    Ambiguous,
}

impl CallerRejection {
    fn into_response(self) -> Response {
        match self {
            CallerRejection::Malformed(header) => errors::json_error(
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                format!("{header} must be a non-blank identifier"),
            ),
            CallerRejection::Ambiguous => errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_argument",
                format!("send either {VENDOR_HEADER} or {AGENT_HEADER}, not both"),
            ),
        }
    }
}

/// Attach a [`CallerContext`] to every request.
///
/// Requests without identity headers continue as `Anonymous`; handlers decide
/// whether they need a caller. Malformed or conflicting headers are rejected.
pub async fn caller_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let caller = extract_caller(req.headers()).map_err(CallerRejection::into_response)?;
    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

fn extract_caller(headers: &HeaderMap) -> Result<CallerContext, CallerRejection> {
    let vendor = header_value(headers, VENDOR_HEADER)?;
    let agent = header_value(headers, AGENT_HEADER)?;

    match (vendor, agent) {
        (None, None) => Ok(CallerContext::Anonymous),
        (Some(v), None) => VendorId::new(v)
            .map(CallerContext::Vendor)
            .map_err(|_| CallerRejection::Malformed(VENDOR_HEADER)),
        (None, Some(a)) => AgentId::new(a)
            .map(CallerContext::Agent)
            .map_err(|_| CallerRejection::Malformed(AGENT_HEADER)),
        (Some(_), Some(_)) => Err(CallerRejection::Ambiguous),
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<Option<&'a str>, CallerRejection> {
    match headers.get(name) {
        None => Ok(None),
        Some(v) => v.to_str().map(Some).map_err(|_| CallerRejection::Malformed(name)),
    }
}
