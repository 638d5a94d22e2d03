//! In-memory backing store.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{StorageBackend, StorageError};

/// Backing store held entirely in memory.
///
/// Used by tests and by sessions that opt out of durability; state dies with
/// the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_owned()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_owned()))?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_owned()))?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_round_trip() {
        let backend = MemoryBackend::new();
        backend.set("k", "v").expect("set");
        assert_eq!(backend.get("k").expect("get"), Some("v".to_owned()));
    }

    #[test]
    fn test_get_missing_is_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("missing").expect("get"), None);
    }

    #[test]
    fn test_set_overwrites() {
        let backend = MemoryBackend::new();
        backend.set("k", "first").expect("set");
        backend.set("k", "second").expect("set");
        assert_eq!(backend.get("k").expect("get"), Some("second".to_owned()));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let backend = MemoryBackend::new();
        backend.set("k", "v").expect("set");
        backend.remove("k").expect("remove");
        assert_eq!(backend.get("k").expect("get"), None);
        backend.remove("k").expect("second remove");
    }
}
