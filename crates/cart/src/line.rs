use serde::{Deserialize, Serialize};

use quickorder_catalog::MAX_QUANTITY_FALLBACK;
use quickorder_core::VariationId;

/// Largest quantity a single line may request.
pub const MAX_LINE_QUANTITY: i64 = MAX_QUANTITY_FALLBACK;

/// One requested `(variation, quantity)` pair of a submission.
///
/// Quantities of zero or below mean "not selected" and are skipped.
/// `variation_id` is `None` when the client sent an id that cannot name any
/// variation (zero or unparsable); such lines fail as invalid variations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub variation_id: Option<VariationId>,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(variation_id: VariationId, quantity: i64) -> Self {
        Self {
            variation_id: Some(variation_id),
            quantity,
        }
    }

    pub fn unresolved(quantity: i64) -> Self {
        Self {
            variation_id: None,
            quantity,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.quantity > 0
    }
}
