//! Batch cart submission for the quick order table.
//!
//! Validates a list of `(variation, quantity)` lines for one parent product
//! against live catalog data and applies the valid ones to the caller's cart,
//! collecting per-line failures instead of aborting.

pub mod error;
pub mod line;
pub mod outcome;
pub mod port;
pub mod submitter;

pub use error::{CartError, SubmissionError};
pub use line::{MAX_LINE_QUANTITY, OrderLine};
pub use outcome::{CartFragments, FailureEntry, FailureReason, SubmissionResult};
pub use port::{CallerContext, CartAddition, CartPort, TokenVerifier};
pub use submitter::BatchCartSubmitter;
