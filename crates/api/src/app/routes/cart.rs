use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use crate::app::{dto, services::AppServices};
use crate::context::SessionContext;

pub async fn get_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> impl IntoResponse {
    let cart = services.carts.cart(session.session_id());
    Json(dto::cart_to_json(&cart))
}
