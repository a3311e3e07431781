//! `quickorder-auth`: request integrity tokens for storefront actions.
//!
//! Tokens bind a visitor's cart session to one action for a limited time.
//! There is no user/role model here: whether a caller may act on a cart is
//! decided by holding a valid token for that cart's session.

pub mod claims;
pub mod token;

pub use claims::{ADD_TO_CART_ACTION, FormTokenClaims, TokenValidationError, validate_claims};
pub use token::{FormTokenService, TokenError};
