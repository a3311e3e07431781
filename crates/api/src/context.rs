use quickorder_core::{ProductId, SessionId};

/// Cart session of the current request.
///
/// Inserted by [`crate::middleware::session_middleware`] for every route.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session_id: SessionId,
}

impl SessionContext {
    pub fn new(session_id: SessionId) -> Self {
        Self { session_id }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }
}

/// What the page hosting the widget is about.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Product shown by the page, when the page is a product page.
    pub product_id: Option<ProductId>,
}

impl PageContext {
    pub fn product_page(product_id: ProductId) -> Self {
        Self {
            product_id: Some(product_id),
        }
    }
}
