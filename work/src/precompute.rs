//! Precomputed work cache.
//!
//! A block's hash is known the moment it is built, and it is the work root
//! of the *next* block from that account. Requesting work for that root
//! ahead of time means the next transaction has zero work latency. The cache
//! holds those nonces keyed by root, and hands one out only while the root
//! still matches the chain.

use std::collections::HashMap;

use nanolattice_types::BlockHash;

/// Cache of precomputed work nonces, keyed by the root they were computed
/// against.
pub struct WorkCache {
    cache: HashMap<[u8; 32], u64>,
    max_entries: usize,
}

impl WorkCache {
    /// Create a cache bounded to `max_entries`.
    pub fn new(max_entries: usize) -> Self {
        Self {
            cache: HashMap::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Store a nonce for a root.
    ///
    /// When full, an arbitrary entry is evicted to make room; callers should
    /// size the cache for their account count.
    pub fn insert(&mut self, root: &BlockHash, nonce: u64) {
        if self.cache.len() >= self.max_entries && !self.cache.contains_key(root.as_bytes()) {
            if let Some(&key) = self.cache.keys().next() {
                self.cache.remove(&key);
            }
        }
        self.cache.insert(*root.as_bytes(), nonce);
    }

    /// Peek at the cached nonce for a root, if any.
    pub fn get(&self, root: &BlockHash) -> Option<u64> {
        self.cache.get(root.as_bytes()).copied()
    }

    /// Consume the cached nonce for the account's *current* root.
    ///
    /// The entry is removed either way; a nonce for a root the chain moved
    /// past is stale and never returned. `current_root` is the value of
    /// `AccountState::work_root()` at spend time.
    pub fn take_valid(&mut self, cached_for: &BlockHash, current_root: &BlockHash) -> Option<u64> {
        let nonce = self.cache.remove(cached_for.as_bytes())?;
        if crate::validator::is_stale(cached_for, current_root) {
            return None;
        }
        Some(nonce)
    }

    /// Drop a cached entry (e.g. after the chain advanced past its root).
    pub fn remove(&mut self, root: &BlockHash) {
        self.cache.remove(root.as_bytes());
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(n: u8) -> BlockHash {
        BlockHash::new([n; 32])
    }

    #[test]
    fn insert_and_get() {
        let mut cache = WorkCache::new(10);
        cache.insert(&hash(1), 42);
        assert_eq!(cache.get(&hash(1)), Some(42));
        assert_eq!(cache.get(&hash(2)), None);
    }

    #[test]
    fn take_valid_consumes_matching_root() {
        let mut cache = WorkCache::new(10);
        cache.insert(&hash(1), 42);
        assert_eq!(cache.take_valid(&hash(1), &hash(1)), Some(42));
        assert!(cache.is_empty());
    }

    #[test]
    fn take_valid_drops_stale_root() {
        let mut cache = WorkCache::new(10);
        cache.insert(&hash(1), 42);
        // The chain advanced: the current root is no longer hash(1).
        assert_eq!(cache.take_valid(&hash(1), &hash(2)), None);
        assert!(cache.is_empty(), "stale entry must not linger");
    }

    #[test]
    fn eviction_at_capacity() {
        let mut cache = WorkCache::new(2);
        cache.insert(&hash(1), 1);
        cache.insert(&hash(2), 2);
        cache.insert(&hash(3), 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&hash(3)), Some(3));
    }

    #[test]
    fn reinsert_overwrites_without_eviction() {
        let mut cache = WorkCache::new(2);
        cache.insert(&hash(1), 1);
        cache.insert(&hash(2), 2);
        cache.insert(&hash(1), 10);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&hash(1)), Some(10));
        assert_eq!(cache.get(&hash(2)), Some(2));
    }

    #[test]
    fn remove_clears_entry() {
        let mut cache = WorkCache::new(10);
        cache.insert(&hash(1), 1);
        cache.remove(&hash(1));
        assert!(cache.is_empty());
    }
}
