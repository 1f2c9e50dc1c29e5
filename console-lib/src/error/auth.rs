//! Authentication error types

/// Errors that can occur while obtaining or using credentials.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No access token is configured.
    #[error("No access token configured")]
    MissingToken,

    /// The server rejected the access token.
    #[error("Access token rejected: {message}")]
    TokenRejected { message: String },

    /// Invalid e-mail or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Network error during authentication.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse authentication response.
    #[error("Auth response parse error: {0}")]
    Parse(String),
}
