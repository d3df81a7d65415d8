use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use ahash::RandomState;
use tracing::trace;

use crate::constants::MJD;

use super::NutationAngles;

/// Default number of memoized nutation evaluations.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Bounded memo of nutation angles keyed by MJD rounded to 1/100 day.
///
/// When the cache is full, arbitrary entries are dropped until it is half empty.
/// Nothing can be assumed about which entries survive, only that a hit returns the
/// exact value stored for that key. A capacity of zero disables memoization.
#[derive(Debug)]
pub struct NutationCache {
    capacity: usize,
    entries: Mutex<HashMap<i64, NutationAngles, RandomState>>,
}

impl Default for NutationCache {
    fn default() -> Self {
        NutationCache::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl NutationCache {
    pub fn new(capacity: usize) -> Self {
        NutationCache {
            capacity,
            entries: Mutex::new(HashMap::with_capacity_and_hasher(
                capacity,
                RandomState::new(),
            )),
        }
    }

    /// Bucket key of an epoch.
    pub fn key(mjd: MJD) -> i64 {
        (mjd * 100.0).round() as i64
    }

    /// Epoch represented by a bucket key.
    pub fn bucket_mjd(key: i64) -> MJD {
        key as f64 / 100.0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn get(&self, key: i64) -> Option<NutationAngles> {
        self.lock().get(&key).copied()
    }

    pub fn insert(&self, key: i64, angles: NutationAngles) {
        if self.capacity == 0 {
            return;
        }

        let mut entries = self.lock();
        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let target = self.capacity / 2;
            let victims: Vec<i64> = entries
                .keys()
                .take(entries.len() - target)
                .copied()
                .collect();
            for victim in &victims {
                entries.remove(victim);
            }
            trace!(evicted = victims.len(), "nutation cache full");
        }
        entries.insert(key, angles);
    }

    // A panic while holding the lock cannot leave the map half-written, so a
    // poisoned mutex is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<i64, NutationAngles, RandomState>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod cache_test {
    use super::*;

    fn angles(x: f64) -> NutationAngles {
        NutationAngles { dpsi: x, deps: -x }
    }

    #[test]
    fn test_key_rounding() {
        assert_eq!(NutationCache::key(60000.0), 6_000_000);
        assert_eq!(NutationCache::key(60000.004), 6_000_000);
        assert_eq!(NutationCache::key(60000.006), 6_000_001);
        assert_eq!(NutationCache::bucket_mjd(6_000_001), 60000.01);
    }

    #[test]
    fn test_hit_returns_stored_value() {
        let cache = NutationCache::new(10);
        cache.insert(42, angles(1.5));
        assert_eq!(cache.get(42), Some(angles(1.5)));
        assert_eq!(cache.get(43), None);
    }

    #[test]
    fn test_eviction_halves_the_cache() {
        let cache = NutationCache::new(8);
        for key in 0..8 {
            cache.insert(key, angles(key as f64));
        }
        assert_eq!(cache.len(), 8);

        cache.insert(100, angles(100.0));
        assert_eq!(cache.len(), 5);
        assert_eq!(cache.get(100), Some(angles(100.0)));

        // Surviving entries keep their exact values
        for key in 0..8 {
            if let Some(a) = cache.get(key) {
                assert_eq!(a, angles(key as f64));
            }
        }
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let cache = NutationCache::new(2);
        cache.insert(1, angles(1.0));
        cache.insert(2, angles(2.0));
        cache.insert(2, angles(3.0));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(2), Some(angles(3.0)));
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let cache = NutationCache::new(0);
        cache.insert(1, angles(1.0));
        assert!(cache.is_empty());
    }
}
