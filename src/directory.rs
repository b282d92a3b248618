//! Local user directory.
//!
//! The registered-users list the auth actions work against, persisted under
//! the `"users"` key as a JSON array. Legacy records that spelled the email
//! field `Email` are migrated at load time through a serde alias and written
//! back canonically on the next save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Role;
use crate::storage::KeyValueStore;
use crate::validators::normalize_email;
use crate::CoreError;

const USERS_KEY: &str = "users";

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub identity_id: String,
    pub display_name: String,
    #[serde(alias = "Email")]
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(any(test, feature = "mocks"))]
impl UserRecord {
    pub fn mock_from_credentials(email: &str, hashed_password: &str) -> Self {
        UserRecord {
            identity_id: "u1".to_owned(),
            display_name: "Test User".to_owned(),
            email: email.to_owned(),
            role: Role::Student,
            hashed_password: hashed_password.to_owned(),
            created_at: Utc::now(),
        }
    }
}

/// Registered-user storage over a [`KeyValueStore`].
///
/// Email lookup is case-insensitive. A corrupt or missing directory is
/// treated as empty, never an error.
#[derive(Clone)]
pub struct UserDirectory<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> UserDirectory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<UserRecord> {
        let Ok(Some(raw)) = self.store.get(USERS_KEY) else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!(
                target: "coursebound::directory",
                "msg=\"discarding unparsable user directory\" error=\"{e}\""
            );
            Vec::new()
        })
    }

    fn save(&self, users: &[UserRecord]) -> Result<(), CoreError> {
        let encoded = serde_json::to_string(users)
            .map_err(|e| CoreError::Storage(format!("Failed to serialize user directory: {e}")))?;
        self.store.set(USERS_KEY, &encoded)
    }

    /// Finds a registered user by email, case-insensitively.
    pub fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        let wanted = normalize_email(email);
        self.load()
            .into_iter()
            .find(|u| normalize_email(&u.email) == wanted)
    }

    /// Appends a new user.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UserAlreadyExists`] if the email is taken.
    pub fn insert(&self, user: UserRecord) -> Result<(), CoreError> {
        let mut users = self.load();

        let wanted = normalize_email(&user.email);
        if users.iter().any(|u| normalize_email(&u.email) == wanted) {
            return Err(CoreError::UserAlreadyExists);
        }

        users.push(user);
        self.save(&users)
    }

    /// Updates the display name and email of an existing user.
    ///
    /// Returns the updated record, or `None` if the identity is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UserAlreadyExists`] if the new email already
    /// belongs to a different identity.
    pub fn update(
        &self,
        identity_id: &str,
        display_name: &str,
        email: &str,
    ) -> Result<Option<UserRecord>, CoreError> {
        let mut users = self.load();

        let wanted = normalize_email(email);
        if users
            .iter()
            .any(|u| u.identity_id != identity_id && normalize_email(&u.email) == wanted)
        {
            return Err(CoreError::UserAlreadyExists);
        }

        let Some(user) = users.iter_mut().find(|u| u.identity_id == identity_id) else {
            return Ok(None);
        };

        display_name.clone_into(&mut user.display_name);
        email.clone_into(&mut user.email);
        let updated = user.clone();

        self.save(&users)?;
        Ok(Some(updated))
    }
}
