//! Chunk stores and an in-memory LRU store
//!
//! A store maps cache keys to serialized chunk payloads. Stores sit outside the
//! generation pipeline: they are consulted before a run and written after it.

use std::collections::HashMap;

use crate::core::Result;

/// Key/value storage for serialized chunk results.
pub trait ChunkStore {
    /// Load the payload stored under `key`, `None` on a miss.
    fn get(&mut self, key: &str) -> Result<Option<String>>;

    /// Store `payload` under `key`, replacing any previous entry.
    fn put(&mut self, key: &str, payload: &str) -> Result<()>;

    /// Remove every entry. Returns how many were removed.
    fn clear(&mut self) -> Result<usize>;
}

/// Capacity-bounded LRU store
///
/// Access order is tracked to determine which entry to evict when the store is full.
pub struct MemoryChunkStore {
    entries: HashMap<String, String>,
    /// Access order: oldest first, newest last
    access_order: Vec<String>,
    max_entries: usize,
}

impl MemoryChunkStore {
    /// Create a store holding at most `max_entries` payloads
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries kept; at least 1
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: HashMap::with_capacity(max_entries),
            access_order: Vec::with_capacity(max_entries),
            max_entries,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict the least recently used entry, returning its key
    pub fn evict_oldest(&mut self) -> Option<String> {
        if self.access_order.is_empty() {
            return None;
        }
        let key = self.access_order.remove(0);
        self.entries.remove(&key);
        log::debug!("Evicted cached chunk {}", key);
        Some(key)
    }

    fn touch(&mut self, key: &str) {
        self.remove_from_access_order(key);
        self.access_order.push(key.to_string());
    }

    fn remove_from_access_order(&mut self, key: &str) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
    }
}

impl ChunkStore for MemoryChunkStore {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        if !self.entries.contains_key(key) {
            return Ok(None);
        }
        self.touch(key);
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, payload: &str) -> Result<()> {
        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }
        self.entries.insert(key.to_string(), payload.to_string());
        self.touch(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<usize> {
        let count = self.entries.len();
        self.entries.clear();
        self.access_order.clear();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new() {
        let store = MemoryChunkStore::new(10);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_and_get() {
        let mut store = MemoryChunkStore::new(10);
        store.put("a", "{}").unwrap();
        assert!(store.contains("a"));
        assert_eq!(store.get("a").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.get("b").unwrap(), None);
    }

    #[test]
    fn test_put_replaces() {
        let mut store = MemoryChunkStore::new(10);
        store.put("a", "1").unwrap();
        store.put("a", "2").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_lru_eviction() {
        let mut store = MemoryChunkStore::new(3);
        store.put("1", "").unwrap();
        store.put("2", "").unwrap();
        store.put("3", "").unwrap();

        store.put("4", "").unwrap();
        assert_eq!(store.len(), 3);
        assert!(!store.contains("1"));
        assert!(store.contains("4"));
    }

    #[test]
    fn test_lru_access_order() {
        let mut store = MemoryChunkStore::new(3);
        store.put("1", "").unwrap();
        store.put("2", "").unwrap();
        store.put("3", "").unwrap();

        // reading "1" makes "2" the oldest
        store.get("1").unwrap();
        store.put("4", "").unwrap();
        assert!(store.contains("1"));
        assert!(!store.contains("2"));
    }

    #[test]
    fn test_clear_counts() {
        let mut store = MemoryChunkStore::new(4);
        store.put("1", "").unwrap();
        store.put("2", "").unwrap();
        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.is_empty());
        assert_eq!(store.evict_oldest(), None);
        assert_eq!(store.clear().unwrap(), 0);
    }
}
