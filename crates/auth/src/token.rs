use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use quickorder_cart::TokenVerifier;
use quickorder_core::SessionId;

use crate::claims::{ADD_TO_CART_ACTION, FormTokenClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Encode(String),

    #[error("malformed or forged token: {0}")]
    Decode(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Issues and verifies HS256-signed form tokens for the add-to-cart action.
#[derive(Clone)]
pub struct FormTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl core::fmt::Debug for FormTokenService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FormTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl FormTokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `session_id`, valid from `now` for the configured TTL.
    pub fn issue_at(&self, session_id: SessionId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = FormTokenClaims {
            sub: session_id,
            action: ADD_TO_CART_ACTION.to_string(),
            issued_at: now,
            expires_at: now + self.ttl,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    pub fn issue(&self, session_id: SessionId) -> Result<String, TokenError> {
        self.issue_at(session_id, Utc::now())
    }

    /// Decode and fully validate a token presented by `session_id`.
    pub fn verify_at(
        &self,
        token: &str,
        session_id: SessionId,
        now: DateTime<Utc>,
    ) -> Result<FormTokenClaims, TokenError> {
        // Time claims are RFC3339 fields checked by `validate_claims`, not `exp`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<FormTokenClaims>(token, &self.decoding, &validation)
            .map_err(|e| TokenError::Decode(e.to_string()))?;

        validate_claims(&data.claims, session_id, ADD_TO_CART_ACTION, now)?;
        Ok(data.claims)
    }
}

impl TokenVerifier for FormTokenService {
    fn verify(&self, token: &str, session_id: SessionId) -> bool {
        match self.verify_at(token, session_id, Utc::now()) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(session_id = %session_id, "form token rejected: {e}");
                false
            }
        }
    }
}
