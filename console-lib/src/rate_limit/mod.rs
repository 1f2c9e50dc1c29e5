//! Retry configuration for transient API failures.

mod retry;

pub use retry::RetryConfig;
