//! Error types

mod api;
mod auth;
mod table;

pub use api::*;
pub use auth::*;
pub use table::*;

/// Any error produced by the console library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The REST API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Authentication failed or no credentials were available.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A data table operation was rejected.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl Error {
    /// Returns the HTTP status code if this error came from an HTTP response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.status_code(),
            _ => None,
        }
    }

    /// Returns `true` if the request may succeed when sent again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_retryable())
    }
}
