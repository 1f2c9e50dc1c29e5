//! Admin login response types.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::AccessToken;

/// Response of `POST /auth/login/admin`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: LoginUser,
    pub tokens: LoginTokens,
}

/// The signed-in operator.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub id: String,
    #[serde(default)]
    pub fullname: Option<String>,
    pub email: String,
    pub role: String,
}

/// Access and refresh tokens issued on login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginTokens {
    pub access: TokenInfo,
    #[serde(default)]
    pub refresh: Option<TokenInfo>,
}

/// A token with its expiry timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfo {
    pub token: String,
    pub expires: DateTime<Utc>,
}

impl LoginResponse {
    /// Returns the access token to authenticate subsequent calls.
    pub fn access_token(&self) -> AccessToken {
        AccessToken::with_expiry(self.tokens.access.token.clone(), self.tokens.access.expires)
    }
}
