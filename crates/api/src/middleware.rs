use axum::{
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use quickorder_core::SessionId;

use crate::context::SessionContext;

/// Header carrying the visitor's cart session, in both directions.
pub const SESSION_HEADER: &str = "x-cart-session";

/// Resolve the cart session for the request, minting one when absent.
///
/// The effective session id is echoed back so clients can keep using it.
pub async fn session_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let session = match extract_session(req.headers()) {
        Some(id) => SessionContext::new(id),
        None => {
            let id = SessionId::new();
            tracing::debug!(session_id = %id, "minted new cart session");
            SessionContext::new(id)
        }
    };

    req.extensions_mut().insert(session);
    let mut res = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&session.session_id().to_string()) {
        res.headers_mut().insert(SESSION_HEADER, value);
    }
    res
}

fn extract_session(headers: &HeaderMap) -> Option<SessionId> {
    let raw = headers.get(SESSION_HEADER)?.to_str().ok()?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}
