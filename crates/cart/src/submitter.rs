use quickorder_catalog::{CatalogSource, Product};
use quickorder_core::{CartLineKey, ProductId, SessionId, VariationId};

use crate::{
    CallerContext, CartAddition, CartPort, FailureEntry, FailureReason, MAX_LINE_QUANTITY, OrderLine,
    SubmissionError, SubmissionResult, TokenVerifier,
};

/// Applies a batch of order lines for one variable product to a cart.
///
/// Stateless: holds only collaborator handles, so one instance can serve every
/// request. No stock is reserved; each line re-reads the variation when it is
/// evaluated, so repeated variations are checked independently.
#[derive(Debug, Clone)]
pub struct BatchCartSubmitter<C, K, T> {
    catalog: C,
    cart: K,
    tokens: T,
}

impl<C, K, T> BatchCartSubmitter<C, K, T>
where
    C: CatalogSource,
    K: CartPort,
    T: TokenVerifier,
{
    pub fn new(catalog: C, cart: K, tokens: T) -> Self {
        Self {
            catalog,
            cart,
            tokens,
        }
    }

    /// Validate and apply `lines` to the caller's cart.
    ///
    /// Preconditions (token, product, non-empty lines) abort the whole call
    /// before anything is added. After that each line either adds to the cart
    /// or records a [`FailureEntry`]; a batch where nothing was added fails
    /// with [`SubmissionError::NothingAdded`].
    pub fn submit_batch(
        &self,
        product_id: Option<ProductId>,
        caller: &CallerContext,
        lines: &[OrderLine],
    ) -> Result<SubmissionResult, SubmissionError> {
        let session_id = caller.session_id();

        if !self.tokens.verify(caller.security_token(), session_id) {
            tracing::warn!(session_id = %session_id, "quick order submission rejected: bad security token");
            return Err(SubmissionError::InvalidToken);
        }

        let product_id = product_id.ok_or(SubmissionError::MissingProduct)?;
        let product = self
            .catalog
            .product(product_id)
            .filter(Product::is_variable)
            .ok_or(SubmissionError::InvalidProduct(product_id))?;

        if lines.is_empty() {
            return Err(SubmissionError::NoItems);
        }

        let children = self.catalog.child_variations(product_id);
        let mut added_count = 0usize;
        let mut failures = Vec::new();

        for line in lines {
            if !line.is_selected() {
                tracing::debug!(
                    variation_id = line.variation_id.map(|id| id.get()),
                    quantity = line.quantity,
                    "skipping unselected line"
                );
                continue;
            }

            match self.apply_line(&product, &children, session_id, line) {
                Ok(line_key) => {
                    added_count += 1;
                    tracing::debug!(
                        variation_id = line.variation_id.map(|id| id.get()),
                        line_key = %line_key,
                        "line added to cart"
                    );
                }
                Err(reason) => {
                    tracing::warn!(
                        product_id = %product_id,
                        variation_id = line.variation_id.map(|id| id.get()),
                        reason = reason.code(),
                        "quick order line failed"
                    );
                    failures.push(FailureEntry {
                        variation_id: line.variation_id,
                        reason,
                    });
                }
            }
        }

        if added_count == 0 {
            tracing::info!(product_id = %product_id, failed = failures.len(), "quick order added nothing");
            return Err(SubmissionError::NothingAdded { failures });
        }

        let fragments = self.cart.refresh_fragments(session_id);

        tracing::info!(
            product_id = %product_id,
            added = added_count,
            failed = failures.len(),
            "quick order submitted"
        );

        Ok(SubmissionResult {
            added_count,
            failures,
            fragments,
        })
    }

    fn apply_line(
        &self,
        product: &Product,
        children: &[VariationId],
        session_id: SessionId,
        line: &OrderLine,
    ) -> Result<CartLineKey, FailureReason> {
        let variation_id = line
            .variation_id
            .filter(|id| children.contains(id))
            .ok_or(FailureReason::InvalidVariation)?;

        let variation = self
            .catalog
            .variation(variation_id)
            .ok_or(FailureReason::NotFound)?;

        variation.check_purchase(line.quantity)?;

        if line.quantity > MAX_LINE_QUANTITY {
            return Err(FailureReason::QuantityTooLarge {
                max: MAX_LINE_QUANTITY,
            });
        }

        let addition = CartAddition {
            product_id: product.id_typed(),
            variation_id,
            quantity: line.quantity,
            attributes: variation.attributes().clone(),
        };

        self.cart.add_item(session_id, &addition).map_err(|e| {
            tracing::warn!(variation_id = %variation_id, "cart add failed: {e}");
            FailureReason::AddFailed
        })
    }
}
