//! Collaborator boundaries used by the submitter.

use std::sync::Arc;

use quickorder_catalog::AttributeSet;
use quickorder_core::{CartLineKey, ProductId, SessionId, VariationId};

use crate::{CartError, CartFragments};

/// Who is submitting: the cart session and the security token they presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    session_id: SessionId,
    security_token: String,
}

impl CallerContext {
    pub fn new(session_id: SessionId, security_token: impl Into<String>) -> Self {
        Self {
            session_id,
            security_token: security_token.into(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn security_token(&self) -> &str {
        &self.security_token
    }
}

/// A validated line about to be added to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartAddition {
    pub product_id: ProductId,
    pub variation_id: VariationId,
    pub quantity: i64,
    pub attributes: AttributeSet,
}

/// The external cart, keyed by caller session.
pub trait CartPort: Send + Sync {
    fn add_item(&self, session_id: SessionId, addition: &CartAddition) -> Result<CartLineKey, CartError>;

    /// Current display fragments of the session's cart (mini cart, totals).
    fn refresh_fragments(&self, session_id: SessionId) -> CartFragments;
}

/// Verifies the request integrity token for a session.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, session_id: SessionId) -> bool;
}

impl<S> CartPort for Arc<S>
where
    S: CartPort + ?Sized,
{
    fn add_item(&self, session_id: SessionId, addition: &CartAddition) -> Result<CartLineKey, CartError> {
        (**self).add_item(session_id, addition)
    }

    fn refresh_fragments(&self, session_id: SessionId) -> CartFragments {
        (**self).refresh_fragments(session_id)
    }
}

impl<S> TokenVerifier for Arc<S>
where
    S: TokenVerifier + ?Sized,
{
    fn verify(&self, token: &str, session_id: SessionId) -> bool {
        (**self).verify(token, session_id)
    }
}
