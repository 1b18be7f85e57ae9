// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Keyed in-memory cache with a fixed time-to-live.
//!
//! There is no capacity bound and no eviction policy: an entry stays in the map
//! until it is overwritten or the whole cache is cleared, and a stale entry is
//! simply ignored on lookup.
//!
//! Every [`TtlCache::clear`] starts a new generation. A fetch that began before
//! the clear stores its result with [`TtlCache::insert_if_current`], which drops
//! the value once the generation has moved on.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

struct Slots<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    generation: u64,
}

pub struct TtlCache<K, V> {
    ttl: Duration,
    slots: Mutex<Slots<K, V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(Slots {
                entries: HashMap::new(),
                generation: 0,
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value if it was stored less than `ttl` ago.
    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let slots = self.slots.lock();
        slots
            .entries
            .get(key)
            .filter(|entry| entry.is_fresh(self.ttl, now))
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn insert_at(&self, key: K, value: V, fetched_at: Instant) {
        self.slots
            .lock()
            .entries
            .insert(key, CacheEntry { value, fetched_at });
    }

    pub fn generation(&self) -> u64 {
        self.slots.lock().generation
    }

    /// Stores `value` only if no clear happened since `generation` was read.
    /// Returns whether the value was stored.
    pub fn insert_if_current(&self, key: K, value: V, generation: u64) -> bool {
        let mut slots = self.slots.lock();
        if slots.generation != generation {
            return false;
        }
        slots.entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
        true
    }

    pub fn clear(&self) {
        let mut slots = self.slots.lock();
        slots.entries.clear();
        slots.generation = slots.generation.wrapping_add(1);
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.slots.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_is_returned() {
        let cache = TtlCache::new(Duration::from_secs(30));
        let start = Instant::now();
        cache.insert_at("a", 1, start);

        assert_eq!(cache.get_at(&"a", start), Some(1));
        assert_eq!(cache.get_at(&"a", start + Duration::from_millis(29_999)), Some(1));
        assert_eq!(cache.get_at(&"b", start), None);
    }

    #[test]
    fn test_entry_expires_at_ttl() {
        let cache = TtlCache::new(Duration::from_secs(30));
        let start = Instant::now();
        cache.insert_at("a", 1, start);

        assert_eq!(cache.get_at(&"a", start + Duration::from_secs(30)), None);
        // Stale entries stay stored until overwritten or cleared.
        assert_eq!(cache.len(), 1);

        cache.insert_at("a", 2, start + Duration::from_secs(31));
        assert_eq!(cache.get_at(&"a", start + Duration::from_secs(32)), Some(2));
    }

    #[test]
    fn test_clear() {
        let cache = TtlCache::new(Duration::from_secs(30));
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn test_insert_after_clear_is_dropped() {
        let cache = TtlCache::new(Duration::from_secs(30));
        let before = cache.generation();
        cache.clear();

        assert!(!cache.insert_if_current("a", 1, before));
        assert_eq!(cache.get(&"a"), None);

        let current = cache.generation();
        assert!(cache.insert_if_current("a", 2, current));
        assert_eq!(cache.get(&"a"), Some(2));
    }

    #[test]
    fn test_zero_ttl_never_hits() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.insert("a", 1);
        assert_eq!(cache.get(&"a"), None);
    }
}
