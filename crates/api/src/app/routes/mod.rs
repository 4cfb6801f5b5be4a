use axum::Router;

pub mod common;
pub mod connections;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod system;

/// Router for all endpoints that carry a caller context.
pub fn router() -> Router {
    Router::new()
        .nest("/api/inventory", inventory::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/connections", connections::router())
}
