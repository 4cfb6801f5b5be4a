use std::sync::Arc;

use axum::{
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use vendorhub_connections::{AgentProfile, VendorProfile};
use vendorhub_core::AgentId;

use crate::app::routes::common::{json_body, parse_connection_id, require_agent, require_vendor};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/request/:agent_id", post(create_request))
        .route("/agents", get(connected_agents))
        .route("/vendors", get(connected_vendors))
        .route("/requests", get(pending_requests))
        .route("/:id", get(get_connection).delete(delete_connection))
        .route("/:id/accept", post(accept_request))
        .route("/:id/reject", post(reject_request))
}

/// Vendor asks an agent to connect.
pub async fn create_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(agent_id): Path<String>,
    body: Result<Json<dto::ConnectionRequestBody>, JsonRejection>,
) -> axum::response::Response {
    let vendor_id = match require_vendor(&caller) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let agent_id = match AgentId::new(agent_id) {
        Ok(a) => a,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let body = match json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let vendor = VendorProfile {
        name: body.vendor_name,
        shop_name: body.vendor_shop_name,
    };
    let agent = AgentProfile {
        name: body.agent_name,
        agency_name: body.agency_name,
    };

    match services
        .connections()
        .request(vendor_id, agent_id, vendor, agent, Utc::now())
    {
        Ok(c) => (StatusCode::CREATED, Json(dto::connection_to_json(&c))).into_response(),
        Err(e) => errors::connection_error_to_response(e),
    }
}

pub async fn accept_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let agent_id = match require_agent(&caller) {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    let id = match parse_connection_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.connections().accept(id, agent_id, Utc::now()) {
        Ok(c) => (StatusCode::OK, Json(dto::connection_to_json(&c))).into_response(),
        Err(e) => errors::connection_error_to_response(e),
    }
}

pub async fn reject_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let agent_id = match require_agent(&caller) {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    let id = match parse_connection_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.connections().reject(id, agent_id, Utc::now()) {
        Ok(c) => (StatusCode::OK, Json(dto::connection_to_json(&c))).into_response(),
        Err(e) => errors::connection_error_to_response(e),
    }
}

pub async fn get_connection(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Some(participant) = caller.participant() else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "identity required");
    };
    let id = match parse_connection_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.connections().get(id) {
        Ok(Some(c)) if c.involves(&participant) => {
            (StatusCode::OK, Json(dto::connection_to_json(&c))).into_response()
        }
        // Connections of other parties are indistinguishable from missing ones.
        Ok(_) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "connection not found"),
        Err(e) => errors::connection_error_to_response(e),
    }
}

pub async fn delete_connection(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Some(participant) = caller.participant() else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "identity required");
    };
    let id = match parse_connection_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.connections().delete(id, &participant) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "connection deleted" })),
        )
            .into_response(),
        Err(e) => errors::connection_error_to_response(e),
    }
}

/// Agents the calling vendor is connected to.
pub async fn connected_agents(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
) -> axum::response::Response {
    let vendor_id = match require_vendor(&caller) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.connections().connected_agents(&vendor_id) {
        Ok(cs) => (StatusCode::OK, Json(dto::connections_to_json(&cs))).into_response(),
        Err(e) => errors::connection_error_to_response(e),
    }
}

/// Vendors the calling agent is connected to.
pub async fn connected_vendors(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
) -> axum::response::Response {
    let agent_id = match require_agent(&caller) {
        Ok(a) => a,
        Err(resp) => return resp,
    };

    match services.connections().connected_vendors(&agent_id) {
        Ok(cs) => (StatusCode::OK, Json(dto::connections_to_json(&cs))).into_response(),
        Err(e) => errors::connection_error_to_response(e),
    }
}

/// Requests awaiting the calling agent's decision.
pub async fn pending_requests(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
) -> axum::response::Response {
    let agent_id = match require_agent(&caller) {
        Ok(a) => a,
        Err(resp) => return resp,
    };

    match services.connections().pending_requests(&agent_id) {
        Ok(cs) => (StatusCode::OK, Json(dto::connections_to_json(&cs))).into_response(),
        Err(e) => errors::connection_error_to_response(e),
    }
}
