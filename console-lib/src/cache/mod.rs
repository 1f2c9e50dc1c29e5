//! Query result caching
//!
//! Pages fetched by the remote data table are cached under their query key.
//! Each entry carries the sequence number of the request that produced it,
//! so a slow response can never overwrite a newer one for the same key.

mod config;
mod memory;

pub use config::*;
pub use memory::*;

use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;

/// A cached value with metadata about when it was cached and when it expires.
#[derive(Debug)]
pub struct CachedValue<V> {
    /// The cached data.
    pub data: Arc<V>,
    /// Sequence number of the request that produced the data.
    pub seq: u64,
    /// When this value was cached.
    pub created_at: DateTime<Utc>,
    /// When this value expires and should no longer be returned.
    pub expires_at: DateTime<Utc>,
}

impl<V> Clone for CachedValue<V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            seq: self.seq,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

impl<V> CachedValue<V> {
    /// Creates a new cached value with a TTL from now.
    pub fn with_ttl(data: V, seq: u64, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        Self {
            data: Arc::new(data),
            seq,
            created_at: now,
            expires_at,
        }
    }

    /// Returns `true` if this cached value has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
