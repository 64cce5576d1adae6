//! Whole-collection persistence over a key-value backend.
//!
//! The gateway never owns data; it serializes what a store hands it and
//! hands back what the backend holds. Failures are logged here and never
//! propagated: a bad read yields an empty collection, a failed write keeps
//! the previously persisted value.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::{Result, TimelogError};
use crate::storage::traits::KeyValueStore;

/// Key holding the entry collection.
pub const ENTRIES_KEY: &str = "timetracker_entries";

/// Key holding the template collection.
pub const TEMPLATES_KEY: &str = "timetracker_templates";

/// Mirrors collections into a shared key-value backend.
#[derive(Clone)]
pub struct PersistenceGateway {
    backend: Rc<dyn KeyValueStore>,
}

impl PersistenceGateway {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn from_store(store: impl KeyValueStore + 'static) -> Self {
        Self::new(Rc::new(store))
    }

    /// Load the collection stored under `key`.
    ///
    /// A missing key yields an empty collection. Unreadable or unparseable
    /// data is logged and also yields an empty collection.
    pub fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.try_load(key) {
            Ok(items) => {
                debug!(key, count = items.len(), "Loaded collection");
                items
            }
            Err(err) => {
                error!(key, error = %err, "Error loading collection");
                Vec::new()
            }
        }
    }

    /// Persist `items` under `key`.
    ///
    /// Returns whether the write reached the backend. On failure the error is
    /// logged and the previously persisted value is left untouched.
    pub fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) -> bool {
        match self.try_save(key, items) {
            Ok(()) => true,
            Err(err) => {
                error!(key, error = %err, "Error saving collection");
                false
            }
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let stored = self
            .backend
            .get(key)
            .map_err(|e| TimelogError::PersistenceRead(e.to_string()))?;
        match stored {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| TimelogError::PersistenceRead(format!("Invalid JSON: {}", e))),
        }
    }

    fn try_save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let encoded = serde_json::to_string(items)?;
        self.backend
            .set(key, &encoded)
            .map_err(|e| TimelogError::PersistenceWrite(e.to_string()))
    }
}
