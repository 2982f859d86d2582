//! In-memory key-value backend for testing and development

use crate::storage::KeyValue;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory [`KeyValue`] implementation
///
/// Useful for tests and demo data. Uses RwLock for thread-safe access;
/// clones share the same underlying map, so two stores built on clones of
/// one backend observe the same collections.
#[derive(Clone)]
pub struct MemoryBackend {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    /// Create a new, empty in-memory backend
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValue for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        data.insert(key.to_owned(), value.to_owned());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        data.remove(key);

        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(data.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_returns_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("stores").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let backend = MemoryBackend::new();
        backend.set("stores", "[]").unwrap();
        assert_eq!(backend.get("stores").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let backend = MemoryBackend::new();
        backend.set("stores", "[]").unwrap();
        backend.set("stores", r#"[{"id":"x"}]"#).unwrap();
        assert_eq!(
            backend.get("stores").unwrap().as_deref(),
            Some(r#"[{"id":"x"}]"#)
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let backend = MemoryBackend::new();
        backend.set("stores", "[]").unwrap();
        backend.remove("stores").unwrap();
        backend.remove("stores").unwrap();
        assert_eq!(backend.get("stores").unwrap(), None);
    }

    #[test]
    fn test_clones_share_data() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();
        backend.set("visits", "[]").unwrap();
        assert_eq!(clone.get("visits").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_keys_lists_written_keys() {
        let backend = MemoryBackend::new();
        backend.set("stores", "[]").unwrap();
        backend.set("visits", "[]").unwrap();

        let mut keys = backend.keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["stores", "visits"]);
    }
}
