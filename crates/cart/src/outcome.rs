use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use quickorder_catalog::PurchaseBlock;
use quickorder_core::VariationId;

/// Why a single line was not added. The batch continues past these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The variation is not a child of the submitted product.
    InvalidVariation,
    NotFound,
    NotPurchasable,
    OutOfStock,
    InsufficientStock { available: i64 },
    /// More than [`crate::MAX_LINE_QUANTITY`] requested for one line.
    QuantityTooLarge { max: i64 },
    /// The cart collaborator refused or failed the addition.
    AddFailed,
}

impl FailureReason {
    pub fn code(&self) -> &'static str {
        match self {
            FailureReason::InvalidVariation => "invalid_variation",
            FailureReason::NotFound => "not_found",
            FailureReason::NotPurchasable => "not_purchasable",
            FailureReason::OutOfStock => "out_of_stock",
            FailureReason::InsufficientStock { .. } => "insufficient_stock",
            FailureReason::QuantityTooLarge { .. } => "invalid_quantity",
            FailureReason::AddFailed => "add_failed",
        }
    }

    pub fn message(&self) -> String {
        match self {
            FailureReason::InvalidVariation => "Invalid variation.".to_string(),
            FailureReason::NotFound => "Variation not found.".to_string(),
            FailureReason::NotPurchasable => "This variation cannot be purchased.".to_string(),
            FailureReason::OutOfStock => "Out of stock.".to_string(),
            FailureReason::InsufficientStock { available } => {
                format!("Only {available} left in stock.")
            }
            FailureReason::QuantityTooLarge { max } => format!("Quantity cannot exceed {max}."),
            FailureReason::AddFailed => "Could not add to cart.".to_string(),
        }
    }
}

impl From<PurchaseBlock> for FailureReason {
    fn from(value: PurchaseBlock) -> Self {
        match value {
            PurchaseBlock::NotPurchasable => FailureReason::NotPurchasable,
            PurchaseBlock::OutOfStock => FailureReason::OutOfStock,
            PurchaseBlock::InsufficientStock { available } => {
                FailureReason::InsufficientStock { available }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureEntry {
    /// `None` for lines whose id named no variation at all.
    pub variation_id: Option<VariationId>,
    pub reason: FailureReason,
}

/// Opaque cart display fragments (selector -> markup) for mini-cart refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartFragments(BTreeMap<String, String>);

impl CartFragments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, selector: impl Into<String>, markup: impl Into<String>) {
        self.0.insert(selector.into(), markup.into());
    }

    pub fn get(&self, selector: &str) -> Option<&str> {
        self.0.get(selector).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of a submission that added at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub added_count: usize,
    /// Per-line failures, in input order.
    pub failures: Vec<FailureEntry>,
    /// Refreshed cart fragments returned by the cart after the additions.
    pub fragments: CartFragments,
}

impl SubmissionResult {
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// User-facing summary, e.g. `"Added 2 item(s) to cart. 1 item(s) failed."`.
    pub fn message(&self) -> String {
        let mut message = format!("Added {} item(s) to cart.", self.added_count);
        if !self.failures.is_empty() {
            message.push_str(&format!(" {} item(s) failed.", self.failures.len()));
        }
        message
    }
}
