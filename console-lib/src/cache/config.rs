//! Cache configuration

use std::time::Duration;

/// Configuration for the query cache.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use console_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default().with_query_ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a fetched page may be shown while newer data loads.
    ///
    /// Default: 5 minutes
    pub query_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            query_ttl: Duration::from_secs(300),
        }
    }
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the query TTL.
    pub fn with_query_ttl(mut self, ttl: Duration) -> Self {
        self.query_ttl = ttl;
        self
    }

    /// Creates a config that keeps nothing beyond the current response.
    pub fn no_cache() -> Self {
        Self {
            query_ttl: Duration::ZERO,
        }
    }
}
