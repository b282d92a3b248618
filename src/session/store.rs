//! Active-session storage.

use crate::storage::KeyValueStore;
use crate::CoreError;

use super::Session;

/// Storage key for the active session.
const SESSION_KEY: &str = "session";

/// Persists and retrieves the single active [`Session`].
///
/// Generic over the [`KeyValueStore`] backend; cloning shares the backend.
///
/// # Example
///
/// ```rust
/// use coursebound::{MemoryStore, SessionStore};
///
/// let sessions = SessionStore::new(MemoryStore::new());
/// assert!(sessions.current().is_none());
/// ```
#[derive(Clone)]
pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the active session, or `None` if nobody is logged in.
    ///
    /// Never fails: a storage error or an unparsable persisted value is
    /// treated the same as an absent session.
    pub fn current(&self) -> Option<Session> {
        let raw = self.store.get(SESSION_KEY).ok()??;

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!(
                    target: "coursebound::session",
                    "msg=\"discarding unparsable persisted session\" error=\"{e}\""
                );
                None
            }
        }
    }

    /// Replaces the active session.
    ///
    /// A single-key overwrite, so no partial-write state is ever observable
    /// through [`current`](Self::current).
    pub fn save(&self, session: &Session) -> Result<(), CoreError> {
        let encoded = serde_json::to_string(session)
            .map_err(|e| CoreError::Storage(format!("Failed to serialize session: {e}")))?;
        self.store.set(SESSION_KEY, &encoded)
    }

    /// Removes the active session.
    pub fn clear(&self) -> Result<(), CoreError> {
        self.store.remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use crate::session::Role;
    use crate::storage::MemoryStore;

    use super::*;

    #[test]
    fn test_save_and_current() {
        let sessions = SessionStore::new(MemoryStore::new());
        let session = Session::mock(Role::Student);

        sessions.save(&session).unwrap();

        let current = sessions.current().unwrap();
        assert_eq!(current, session);
    }

    #[test]
    fn test_current_absent() {
        let sessions = SessionStore::new(MemoryStore::new());
        assert!(sessions.current().is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let sessions = SessionStore::new(MemoryStore::new());

        sessions.save(&Session::mock(Role::Student)).unwrap();

        let mut updated = Session::mock(Role::Student);
        updated.display_name = "Renamed User".to_owned();
        sessions.save(&updated).unwrap();

        assert_eq!(sessions.current().unwrap().display_name, "Renamed User");
    }

    #[test]
    fn test_clear() {
        let sessions = SessionStore::new(MemoryStore::new());

        sessions.save(&Session::mock(Role::Instructor)).unwrap();
        sessions.clear().unwrap();

        assert!(sessions.current().is_none());
    }

    #[test]
    fn test_corrupt_value_degrades_to_none() {
        let store = MemoryStore::new();
        store.set("session", "{not json").unwrap();

        let sessions = SessionStore::new(store);
        assert!(sessions.current().is_none());
    }
}
