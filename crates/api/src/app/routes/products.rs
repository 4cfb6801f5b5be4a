use std::sync::Arc;

use axum::{
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::put,
    Json, Router,
};

use vendorhub_analytics::ProductSnapshot;
use vendorhub_core::ProductId;

use crate::app::routes::common::{json_body, require_vendor};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new().route("/:product_id", put(upsert_product).delete(delete_product))
}

/// Create or replace one of the calling vendor's listings.
pub async fn upsert_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(product_id): Path<String>,
    body: Result<Json<dto::UpsertProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let vendor_id = match require_vendor(&caller) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let product_id = match ProductId::new(product_id) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let body = match json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    if body.product_name.trim().is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "productName cannot be empty");
    }

    let snapshot = ProductSnapshot {
        product_id,
        vendor_id,
        product_name: body.product_name,
        quantity: body.quantity,
    };

    if let Err(e) = services.products().upsert(snapshot.clone()) {
        return errors::store_error_to_response(e);
    }

    (StatusCode::OK, Json(snapshot)).into_response()
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(product_id): Path<String>,
) -> axum::response::Response {
    let vendor_id = match require_vendor(&caller) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let product_id = match ProductId::new(product_id) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.products().remove(&vendor_id, &product_id) {
        Ok(Some(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}
