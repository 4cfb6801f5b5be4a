use std::sync::Arc;

use axum::{
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use vendorhub_analytics::OrderRecord;

use crate::app::routes::common::{json_body, require_vendor};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new().route("/", post(record_order))
}

/// Record an order against the calling vendor.
pub async fn record_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    body: Result<Json<dto::RecordOrderRequest>, JsonRejection>,
) -> axum::response::Response {
    let vendor_id = match require_vendor(&caller) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let body = match json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let order = OrderRecord {
        vendor_id,
        product_id: body.product_id,
        order_quantity: body.order_quantity,
        created_at: body.created_at.unwrap_or_else(Utc::now),
        status: body.status,
    };

    if let Err(e) = services.orders().record(order.clone()) {
        return errors::store_error_to_response(e);
    }

    (StatusCode::CREATED, Json(order)).into_response()
}
