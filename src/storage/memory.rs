//! In-memory key-value storage.
//!
//! Suitable for development, testing, and single-instance deployments.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::CoreError;

use super::KeyValueStore;

/// In-memory key-value storage.
///
/// Stores values in a `HashMap` protected by a `RwLock`. Cloning is cheap
/// and all clones share the same map, so the session, entitlement, and
/// progress stores of one client can sit on top of a single `MemoryStore`.
///
/// # Note
///
/// Values are lost when the process restarts. For persistent storage, use
/// [`FileStore`](super::FileStore).
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns true if there are no keys stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let values = self
            .values
            .read()
            .map_err(|_| CoreError::Storage("Lock poisoned".to_owned()))?;

        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values
            .write()
            .map_err(|_| CoreError::Storage("Lock poisoned".to_owned()))?
            .insert(key.to_owned(), value.to_owned());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.values
            .write()
            .map_err(|_| CoreError::Storage("Lock poisoned".to_owned()))?
            .remove(key);

        Ok(())
    }
}
