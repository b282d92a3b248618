//! Persisted key-value storage.
//!
//! Everything this crate persists goes through the [`KeyValueStore`] trait:
//! string keys, JSON-encoded string values, synchronous and process-local.
//! Implement it to plug in your own backend.
//!
//! # Backends
//!
//! - [`MemoryStore`]: In-memory storage for development and testing
//! - [`FileStore`]: One file per key under a directory
//!
//! # Keys
//!
//! | Key | Written by | Value |
//! |-----|------------|-------|
//! | `session` | [`SessionStore`](crate::SessionStore) | JSON [`Session`](crate::Session) |
//! | `users` | [`UserDirectory`](crate::UserDirectory) | JSON array of [`UserRecord`](crate::UserRecord) |
//! | `entitlements:{identity_id}` | [`EntitlementStore`](crate::EntitlementStore) | JSON array of course ids |
//! | `completion:{course_id}:{identity_id}` | [`ProgressCache`](crate::ProgressCache) | JSON array of video ids |

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::CoreError;

/// Synchronous, process-local key-value storage.
///
/// Readers in this crate treat an unreadable or unparsable value the same as
/// an absent one, so implementations may return `Ok(None)` for values they
/// cannot decode rather than surfacing an error.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Removes the value stored under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
}
