use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/recommendations", get(get_own_recommendations))
        .route("/recommendations/:vendor_id", get(get_recommendations))
}

/// Reorder list for the vendor named in the path.
pub async fn get_recommendations(
    Extension(services): Extension<Arc<AppServices>>,
    Path(vendor_id): Path<String>,
) -> axum::response::Response {
    recommendations_for(&services, &vendor_id)
}

/// Reorder list for the calling vendor.
pub async fn get_own_recommendations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
) -> axum::response::Response {
    match caller.vendor_id() {
        Some(vendor_id) => recommendations_for(&services, vendor_id.as_str()),
        None => errors::json_error(StatusCode::BAD_REQUEST, "invalid_argument", "vendor id is required"),
    }
}

fn recommendations_for(services: &AppServices, vendor_id: &str) -> axum::response::Response {
    match services.recommender().generate(vendor_id) {
        Ok(report) => (StatusCode::OK, Json(dto::recommendations_to_json(report))).into_response(),
        Err(e) => errors::analytics_error_to_response(e),
    }
}
