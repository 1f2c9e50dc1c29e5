//! TokenProvider trait and AccessToken

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::error::AuthError;

/// A bearer access token with optional expiration.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The bearer token used for API authentication.
    pub access_token: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Creates a new access token with just the token string.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// Creates a new access token with expiration time.
    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns the token as a bearer authorization header value.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Source of access tokens for API requests.
///
/// The client asks its provider for a token on every request, so a provider
/// may refresh or rotate tokens without the client noticing.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a valid access token.
    async fn get_token(&self) -> Result<AccessToken, AuthError>;
}

/// A token provider that always returns the same token.
///
/// Useful for scripts and tests where the token is known up front.
///
/// # Example
///
/// ```
/// use console_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("my-access-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a provider for a fixed token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token),
        }
    }

    /// Creates a provider from a full access token.
    pub fn from_token(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        if self.token.is_expired() {
            return Err(AuthError::TokenRejected {
                message: "token expired".to_string(),
            });
        }
        Ok(self.token.clone())
    }
}

/// A provider for unauthenticated clients (used for the login call).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTokenProvider;

#[async_trait]
impl TokenProvider for NoTokenProvider {
    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        Err(AuthError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_returns_token() {
        let provider = StaticTokenProvider::new("abc");
        let token = provider.get_token().await.unwrap();
        assert_eq!(token.as_bearer(), "Bearer abc");
    }

    #[tokio::test]
    async fn test_static_provider_rejects_expired_token() {
        let expired = AccessToken::with_expiry("abc", Utc::now() - chrono::Duration::minutes(1));
        let provider = StaticTokenProvider::from_token(expired);
        assert!(matches!(
            provider.get_token().await,
            Err(AuthError::TokenRejected { .. })
        ));
    }

    #[tokio::test]
    async fn test_no_token_provider() {
        assert!(matches!(
            NoTokenProvider.get_token().await,
            Err(AuthError::MissingToken)
        ));
    }
}
