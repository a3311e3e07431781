//! Session-scoped cart adapter.

use chrono::{DateTime, Utc};
use serde::Serialize;

use quickorder_cart::{CartAddition, CartError, CartFragments, CartPort};
use quickorder_catalog::AttributeSet;
use quickorder_core::{CartLineKey, ProductId, SessionId, VariationId};

use crate::session_store::{InMemorySessionStore, SessionStore};

/// Mini-cart fragment selectors refreshed after a submission.
pub const MINI_CART_SELECTOR: &str = "div.widget_shopping_cart_content";
pub const CART_COUNT_SELECTOR: &str = "span.cart-contents-count";

/// One line of a session cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub key: CartLineKey,
    pub product_id: ProductId,
    pub variation_id: VariationId,
    pub quantity: i64,
    pub attributes: AttributeSet,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionCart {
    lines: Vec<CartLine>,
}

impl SessionCart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |total, l| total.saturating_add(l.quantity))
    }

    /// Merge into an existing line for the same variation and attributes,
    /// otherwise open a new line. The cart is untouched on overflow.
    fn add(&mut self, addition: &CartAddition, now: DateTime<Utc>) -> Result<CartLineKey, CartError> {
        if let Some(line) = self.lines.iter_mut().find(|l| {
            l.variation_id == addition.variation_id && l.attributes == addition.attributes
        }) {
            line.quantity = line.quantity.checked_add(addition.quantity).ok_or_else(|| {
                CartError::Rejected(format!(
                    "quantity overflow for variation {}",
                    addition.variation_id
                ))
            })?;
            line.updated_at = now;
            return Ok(line.key);
        }

        let key = CartLineKey::new();
        self.lines.push(CartLine {
            key,
            product_id: addition.product_id,
            variation_id: addition.variation_id,
            quantity: addition.quantity,
            attributes: addition.attributes.clone(),
            updated_at: now,
        });
        Ok(key)
    }
}

/// In-memory carts keyed by visitor session.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    carts: InMemorySessionStore<SessionCart>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self, session_id: SessionId) -> SessionCart {
        self.carts.get(session_id).unwrap_or_default()
    }
}

impl CartPort for InMemoryCartStore {
    fn add_item(&self, session_id: SessionId, addition: &CartAddition) -> Result<CartLineKey, CartError> {
        if addition.quantity <= 0 {
            return Err(CartError::Rejected(format!(
                "quantity must be positive, got {}",
                addition.quantity
            )));
        }

        let now = Utc::now();
        self.carts
            .update(session_id, |cart| cart.add(addition, now))
            .ok_or_else(|| CartError::Unavailable("cart storage lock poisoned".to_string()))?
    }

    fn refresh_fragments(&self, session_id: SessionId) -> CartFragments {
        let cart = self.cart(session_id);
        let count = cart.item_count();

        let mut fragments = CartFragments::new();
        fragments.insert(
            MINI_CART_SELECTOR,
            format!(
                r#"<div class="widget_shopping_cart_content" data-lines="{}">{} item(s)</div>"#,
                cart.lines().len(),
                count
            ),
        );
        fragments.insert(
            CART_COUNT_SELECTOR,
            format!(r#"<span class="cart-contents-count">{count}</span>"#),
        );
        fragments
    }
}
