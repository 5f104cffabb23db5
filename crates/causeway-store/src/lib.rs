//! In-memory bucket used by development servers and tests
//!
//! Substitutes for the network cache backend in-process: same key/value
//! shape and the same "absent entity" failure signal, with no I/O. The
//! map handles its own sharding, so a bucket can be shared across threads
//! without extra locking.

use dashmap::{DashMap, Entry};
use thiserror::Error;

/// Failure marker for an entity that does not exist in the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("key {key:?} is missing")]
pub struct MissingError {
    /// Key that was not found.
    pub key: String,
}

/// Concurrency-safe in-memory key/value bucket.
#[derive(Debug, Default)]
pub struct MemBucket {
    items: DashMap<String, Vec<u8>>,
}

impl MemBucket {
    /// Create an empty bucket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingError`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<Vec<u8>, MissingError> {
        self.items
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| MissingError {
                key: key.to_owned(),
            })
    }

    /// Store `value` under `key`, replacing any existing value.
    pub fn set(&self, key: &str, value: &[u8]) {
        self.items.insert(key.to_owned(), value.to_vec());
    }

    /// Store `value` under `key` only if the key is absent.
    ///
    /// Returns `false` without modifying the bucket when the key already
    /// exists.
    pub fn add(&self, key: &str, value: &[u8]) -> bool {
        match self.items.entry(key.to_owned()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value.to_vec());
                true
            }
        }
    }

    /// Remove `key` and its value.
    ///
    /// # Errors
    ///
    /// Returns [`MissingError`] if the key is absent.
    pub fn delete(&self, key: &str) -> Result<(), MissingError> {
        self.items
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| MissingError {
                key: key.to_owned(),
            })
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the bucket holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let bucket = MemBucket::new();
        bucket.set("doc", b"{}");
        assert_eq!(bucket.get("doc").unwrap(), b"{}");
    }

    #[test]
    fn get_absent_reports_missing_key() {
        let bucket = MemBucket::new();
        let err = bucket.get("ghost").unwrap_err();
        assert_eq!(err.key, "ghost");
        assert_eq!(err.to_string(), "key \"ghost\" is missing");
    }

    #[test]
    fn set_overwrites() {
        let bucket = MemBucket::new();
        bucket.set("doc", b"v1");
        bucket.set("doc", b"v2");
        assert_eq!(bucket.get("doc").unwrap(), b"v2");
        assert_eq!(bucket.len(), 1);
    }

    #[test]
    fn add_only_inserts_when_absent() {
        let bucket = MemBucket::new();
        assert!(bucket.add("doc", b"first"));
        assert!(!bucket.add("doc", b"second"));
        assert_eq!(bucket.get("doc").unwrap(), b"first");
    }

    #[test]
    fn delete_removes_entry() {
        let bucket = MemBucket::new();
        bucket.set("doc", b"{}");
        bucket.delete("doc").unwrap();
        assert!(bucket.is_empty());
        assert!(bucket.get("doc").is_err());
    }

    #[test]
    fn delete_absent_reports_missing_key() {
        let bucket = MemBucket::new();
        let err = bucket.delete("ghost").unwrap_err();
        assert_eq!(err.key, "ghost");
    }

    #[test]
    fn shared_across_threads() {
        let bucket = std::sync::Arc::new(MemBucket::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let bucket = std::sync::Arc::clone(&bucket);
                std::thread::spawn(move || {
                    let key = format!("doc-{i}");
                    bucket.set(&key, b"{}");
                    bucket.get(&key).unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), b"{}");
        }
        assert_eq!(bucket.len(), 4);
    }
}
