//! Submission error model.

use thiserror::Error;

use quickorder_core::ProductId;

use crate::FailureEntry;

/// Whole-call failure of a batch submission.
///
/// Every variant except `NothingAdded` is raised before any cart mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Security check failed.")]
    InvalidToken,

    #[error("Product ID is required.")]
    MissingProduct,

    /// Unknown product, or a product that is not variable.
    #[error("Invalid product.")]
    InvalidProduct(ProductId),

    #[error("No items selected.")]
    NoItems,

    /// Every line was skipped or failed; carries the per-line failures.
    #[error("Could not add items to cart.")]
    NothingAdded { failures: Vec<FailureEntry> },
}

impl SubmissionError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SubmissionError::InvalidToken => "invalid_token",
            SubmissionError::MissingProduct => "missing_product",
            SubmissionError::InvalidProduct(_) => "invalid_product",
            SubmissionError::NoItems => "no_items",
            SubmissionError::NothingAdded { .. } => "nothing_added",
        }
    }
}

/// Failure reported by the cart collaborator when adding a line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("cart rejected the line: {0}")]
    Rejected(String),

    #[error("cart unavailable: {0}")]
    Unavailable(String),
}
