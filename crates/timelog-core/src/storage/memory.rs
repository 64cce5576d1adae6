//! In-memory key-value backend.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{Result, TimelogError};
use crate::storage::traits::KeyValueStore;

/// Key-value store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any single value larger than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            values: RefCell::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Seed a raw value, bypassing the quota.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(TimelogError::Storage(format!(
                    "Quota exceeded for {} ({} > {} bytes)",
                    key,
                    value.len(),
                    quota
                )));
            }
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_quota_keeps_previous_value() {
        let store = MemoryStore::with_quota(4);
        store.set("k", "abcd").unwrap();
        let err = store.set("k", "abcde").unwrap_err();
        assert!(matches!(err, TimelogError::Storage(_)));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abcd"));
    }
}
