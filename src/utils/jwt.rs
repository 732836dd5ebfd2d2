//! Verification of HS256 session tokens.
//!
//! Tokens are minted by the identity service; this crate only checks the
//! signature and expiry and reads the subject.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user id); empty when the session has no user attached
    #[serde(default)]
    pub sub: String,
    /// Issued at (unix seconds)
    #[serde(default)]
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Option<&str> {
        Some(self.sub.trim()).filter(|s| !s.is_empty())
    }
}

/// Why a token could not be turned into claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRejection {
    /// The token is malformed, forged or expired: the caller has no session
    Invalid(String),
    /// The verifier itself is unusable (bad key material)
    Verifier(String),
}

/// Decodes `token`, tolerating `leeway` seconds of clock skew on `exp`.
pub fn decode_session_token(
    token: &str,
    secret: &str,
    leeway: u64,
) -> Result<Claims, TokenRejection> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = leeway;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidKeyFormat | ErrorKind::InvalidEcdsaKey | ErrorKind::MissingAlgorithm => {
            TokenRejection::Verifier(e.to_string())
        }
        ErrorKind::ExpiredSignature => TokenRejection::Invalid("Token has expired".to_string()),
        ErrorKind::InvalidSignature => {
            TokenRejection::Invalid("Invalid token signature".to_string())
        }
        _ => TokenRejection::Invalid(format!("Token validation failed: {}", e)),
    })
}

/// Test helper standing in for the identity service.
#[cfg(test)]
pub(crate) fn sign_for_tests(sub: &str, expires_in_seconds: i64, secret: &str) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let now = jiff::Timestamp::now().as_second();
    let claims = Claims {
        sub: sub.to_string(),
        iat: now,
        exp: now + expires_in_seconds,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("sign test token")
}
