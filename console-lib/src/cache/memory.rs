//! In-memory query cache using DashMap

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::CacheConfig;
use super::CachedValue;

/// An in-memory cache of query results keyed by query tuple.
#[derive(Debug)]
pub struct QueryCache<K: Eq + Hash, V> {
    store: DashMap<K, CachedValue<V>>,
    config: CacheConfig,
}

impl<K: Eq + Hash + Clone, V> QueryCache<K, V> {
    /// Creates a new empty cache.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            store: DashMap::new(),
            config,
        }
    }

    /// Returns the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Retrieves the value cached for `key`, dropping it if it has expired.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let entry = self.store.get(key)?;
        if entry.is_expired() {
            drop(entry);
            self.store.remove(key);
            None
        } else {
            Some(Arc::clone(&entry.data))
        }
    }

    /// Stores `value` for `key` unless a newer request already did.
    ///
    /// Returns the shared value when it was stored, `None` when it lost to a
    /// newer sequence number.
    pub fn insert(&self, key: K, value: V, seq: u64) -> Option<Arc<V>> {
        let cached = CachedValue::with_ttl(value, seq, self.config.query_ttl);
        let data = Arc::clone(&cached.data);
        match self.store.entry(key) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().seq > seq {
                    return None;
                }
                occupied.insert(cached);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(cached);
            }
        }
        Some(data)
    }

    /// Removes the value for `key`.
    pub fn remove(&self, key: &K) {
        self.store.remove(key);
    }

    /// Clears all values.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Removes all expired entries, keeping `keep` regardless of age.
    ///
    /// Returns the number of entries removed.
    pub fn gc(&self, keep: Option<&K>) -> usize {
        let mut removed = 0;
        self.store.retain(|key, value| {
            if value.is_expired() && keep != Some(key) {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }
}
