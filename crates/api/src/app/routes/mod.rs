use axum::{
    Router,
    routing::{get, post},
};

pub mod cart;
pub mod quick_order;
pub mod system;

/// Router for all session-scoped storefront endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/products/:id/quick-order", get(quick_order::render_for_product))
        .route("/quick-order", get(quick_order::render))
        .route("/quick-order/token", get(quick_order::issue_token))
        .route("/quick-order/add-to-cart", post(quick_order::add_to_cart))
        .route("/cart", get(cart::get_cart))
}
