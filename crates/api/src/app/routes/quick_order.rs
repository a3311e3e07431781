use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use quickorder_cart::CallerContext;
use quickorder_core::ProductId;

use crate::app::{dto, errors, services::AppServices};
use crate::context::{PageContext, SessionContext};
use crate::widget::{SUBMIT_ENDPOINT, WidgetConfig};

pub async fn render_for_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = match id.parse::<ProductId>() {
        Ok(id) => id,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()),
    };

    render_widget(
        &services,
        session,
        WidgetConfig::default(),
        PageContext::product_page(product_id),
    )
}

pub async fn render(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<dto::RenderQuery>,
) -> axum::response::Response {
    let config = WidgetConfig {
        product_id: query.product_id(),
    };
    let page = PageContext {
        product_id: query.page_product_id(),
    };

    render_widget(&services, session, config, page)
}

fn render_widget(
    services: &AppServices,
    session: SessionContext,
    config: WidgetConfig,
    page: PageContext,
) -> axum::response::Response {
    match services.widget.render(config, page, session.session_id()) {
        Ok(widget) => Json(dto::widget_to_json(&widget)).into_response(),
        Err(e) => {
            tracing::error!(session_id = %session.session_id(), "failed to render quick order widget: {e}");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "Could not render quick order table.")
        }
    }
}

pub async fn issue_token(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    match services.tokens.issue(session.session_id()) {
        Ok(token) => Json(json!({
            "securityToken": token,
            "endpoint": SUBMIT_ENDPOINT,
            "expiresInSecs": services.tokens.ttl().num_seconds(),
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(session_id = %session.session_id(), "failed to issue form token: {e}");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "Could not issue security token.")
        }
    }
}

pub async fn add_to_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    payload: Result<Json<dto::SubmitRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(session_id = %session.session_id(), "unreadable add-to-cart body: {rejection}");
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_request", "Invalid request.");
        }
    };

    let caller = CallerContext::new(session.session_id(), body.security_token());
    let lines = body.order_lines();

    match services.submitter.submit_batch(body.product_id(), &caller, &lines) {
        Ok(result) => (StatusCode::OK, Json(dto::submission_to_json(&result))).into_response(),
        Err(e) => errors::submission_error_to_response(e),
    }
}
