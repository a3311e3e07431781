use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use quickorder_core::SessionId;

/// Action name carried by tokens that authorize quick order submissions.
pub const ADD_TO_CART_ACTION: &str = "quick-order.add-to-cart";

/// Claims of a form token (transport-agnostic).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTokenClaims {
    /// Session the token was issued to.
    pub sub: SessionId,

    /// Action the token authorizes.
    pub action: String,

    pub issued_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    #[error("token was issued for another action")]
    WrongAction,

    #[error("token was issued to another session")]
    WrongSession,
}

/// Deterministically validate token claims for `session_id` and `action`.
///
/// Signature verification / decoding happens in [`crate::FormTokenService`].
pub fn validate_claims(
    claims: &FormTokenClaims,
    session_id: SessionId,
    action: &str,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    if claims.action != action {
        return Err(TokenValidationError::WrongAction);
    }
    if claims.sub != session_id {
        return Err(TokenValidationError::WrongSession);
    }
    Ok(())
}
