//! Session lookup for incoming requests.

use async_trait::async_trait;
use axum::http::{HeaderMap, header};

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};
use crate::utils::jwt::{TokenRejection, decode_session_token};

/// The caller's session as seen by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Absent when the session exists but no user is attached to it
    pub user_id: Option<String>,
}

/// Resolves the session attached to a request.
///
/// `Ok(None)` means the caller has no usable session (absent, invalid or
/// expired). `Err` is reserved for failures of the provider itself.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn session(&self, headers: &HeaderMap) -> AppResult<Option<Session>>;
}

/// Reads `Authorization: Bearer <token>` and verifies it as an HS256 JWT.
#[derive(Debug, Clone)]
pub struct JwtSessionProvider {
    secret: String,
    leeway: u64,
}

impl JwtSessionProvider {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            leeway: config.leeway,
        }
    }
}

#[async_trait]
impl SessionProvider for JwtSessionProvider {
    async fn session(&self, headers: &HeaderMap) -> AppResult<Option<Session>> {
        let Some(token) = bearer_token(headers) else {
            return Ok(None);
        };

        match decode_session_token(token, &self.secret, self.leeway) {
            Ok(claims) => Ok(Some(Session {
                user_id: claims.user_id().map(str::to_string),
            })),
            Err(TokenRejection::Invalid(reason)) => {
                tracing::debug!(reason = %reason, "Rejected session token");
                Ok(None)
            }
            Err(TokenRejection::Verifier(reason)) => Err(AppError::Internal {
                source: anyhow::anyhow!("Session verifier failed: {}", reason),
            }),
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::sign_for_tests;
    use axum::http::HeaderValue;

    const TEST_SECRET: &str = "test_secret_key_at_least_32_characters_long";

    fn provider() -> JwtSessionProvider {
        JwtSessionProvider::new(&AuthConfig {
            secret: TEST_SECRET.to_string(),
            leeway: 0,
        })
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[tokio::test]
    async fn test_no_header_means_no_session() {
        let session = provider().session(&HeaderMap::new()).await.unwrap();
        assert_eq!(session, None);
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_means_no_session() {
        let session = provider().session(&headers_with("Basic abc")).await.unwrap();
        assert_eq!(session, None);
    }

    #[tokio::test]
    async fn test_valid_token_yields_user() {
        let token = sign_for_tests("u1", 600, TEST_SECRET);
        let session = provider()
            .session(&headers_with(&format!("Bearer {}", token)))
            .await
            .unwrap();
        assert_eq!(
            session,
            Some(Session {
                user_id: Some("u1".to_string())
            })
        );
    }

    #[tokio::test]
    async fn test_expired_token_means_no_session() {
        let token = sign_for_tests("u1", -600, TEST_SECRET);
        let session = provider()
            .session(&headers_with(&format!("Bearer {}", token)))
            .await
            .unwrap();
        assert_eq!(session, None);
    }

    #[tokio::test]
    async fn test_token_without_subject_has_no_user() {
        let token = sign_for_tests("", 600, TEST_SECRET);
        let session = provider()
            .session(&headers_with(&format!("Bearer {}", token)))
            .await
            .unwrap();
        assert_eq!(session, Some(Session { user_id: None }));
    }
}
