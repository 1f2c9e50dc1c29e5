//! REST API operations

mod crud;
mod loader;
pub mod query;
mod resource;

pub use loader::*;
pub use resource::*;
