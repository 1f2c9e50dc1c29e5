//! Authentication
//!
//! Every request carries the token of the client's [`TokenProvider`]; there
//! is no process-wide authorization header.

mod login;
mod token;

pub use login::LoginResponse;
pub use login::LoginTokens;
pub use login::LoginUser;
pub use login::TokenInfo;
pub use token::AccessToken;
pub use token::NoTokenProvider;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
