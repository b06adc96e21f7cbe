//! Signed-token issuance and validation.
//!
//! Claims are an open JSON mapping; the engine owns the reserved entries
//! (`token_type`, `iat`, `exp`) and silently overwrites caller-supplied values
//! for them. The policy always wins.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::policy::TokenKind;

/// Claims mapping embedded in a signed token.
pub type Claims = serde_json::Map<String, Value>;

/// Reserved claim: which [`TokenKind`] this token is.
pub const CLAIM_TOKEN_TYPE: &str = "token_type";

/// Reserved claim: issuance instant (unix seconds).
pub const CLAIM_ISSUED_AT: &str = "iat";

/// Reserved claim: expiry instant (unix seconds).
pub const CLAIM_EXPIRES_AT: &str = "exp";

/// Conventional claim: subject identifier.
pub const CLAIM_SUBJECT: &str = "sub";

/// The token kind recorded in `claims`, if present and well-formed.
pub fn token_kind(claims: &Claims) -> Option<TokenKind> {
    claims.get(CLAIM_TOKEN_TYPE)?.as_str()?.parse().ok()
}

/// The subject recorded in `claims`, if present.
pub fn subject(claims: &Claims) -> Option<&str> {
    claims.get(CLAIM_SUBJECT)?.as_str()
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token encoding failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    /// The token's `exp` lies in the past.
    #[error("token has expired")]
    Expired,

    /// Malformed token or signature mismatch.
    #[error("invalid token")]
    Invalid,

    /// The computed expiry left the representable date range.
    #[error("token expiry out of range")]
    ExpiryOverflow,
}

/// Access + refresh pair handed out at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token issuance/validation seam.
///
/// Implementations must use the same secret for both directions; rotating the
/// secret invalidates every previously issued token.
pub trait TokenEngine: Send + Sync {
    /// Issue a signed token of `kind` at an explicit instant.
    ///
    /// Reserved claims in `payload` are overwritten by the policy.
    fn issue_at(
        &self,
        kind: TokenKind,
        payload: Claims,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError>;

    /// Decode and verify signature + expiry; returns the claims on success.
    ///
    /// This does **not** check which `token_type` the caller expects; an
    /// access-only endpoint must reject a refresh-typed token itself.
    fn validate(&self, token: &str) -> Result<Claims, TokenError>;

    /// Issue with the current wall clock.
    fn issue(&self, kind: TokenKind, payload: Claims) -> Result<String, TokenError> {
        self.issue_at(kind, payload, Utc::now())
    }
}

/// HMAC-SHA256 token engine over a process-wide secret.
pub struct Hs256TokenEngine {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256TokenEngine {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry checks are exact; no clock-skew grace window.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenEngine for Hs256TokenEngine {
    fn issue_at(
        &self,
        kind: TokenKind,
        mut payload: Claims,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = kind.expires_at(now).ok_or(TokenError::ExpiryOverflow)?;

        payload.insert(CLAIM_TOKEN_TYPE.to_string(), Value::from(kind.as_str()));
        payload.insert(CLAIM_ISSUED_AT.to_string(), Value::from(now.timestamp()));
        payload.insert(
            CLAIM_EXPIRES_AT.to_string(),
            Value::from(expires_at.timestamp()),
        );

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding)
            .map_err(TokenError::Encode)
    }

    fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
