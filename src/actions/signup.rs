use chrono::Utc;

use crate::crypto::{generate_token, hash_password};
use crate::directory::{UserDirectory, UserRecord};
use crate::events::{dispatch, AccessEvent};
use crate::session::Role;
use crate::storage::KeyValueStore;
use crate::validators::validate_email;
use crate::CoreError;

pub struct SignupAction<S: KeyValueStore> {
    directory: UserDirectory<S>,
}

impl<S: KeyValueStore> SignupAction<S> {
    pub fn new(directory: UserDirectory<S>) -> Self {
        SignupAction { directory }
    }

    /// Registers a new user.
    ///
    /// # Returns
    ///
    /// - `Ok(record)` - user registered
    /// - `Err(InvalidEmail)` - email failed validation
    /// - `Err(UserAlreadyExists)` - email already registered
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "signup", skip_all, err)
    )]
    pub async fn execute(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<UserRecord, CoreError> {
        validate_email(email).map_err(|_| CoreError::InvalidEmail)?;

        let record = UserRecord {
            identity_id: generate_token(16),
            display_name: display_name.to_owned(),
            email: email.to_owned(),
            role,
            hashed_password: hash_password(password)?,
            created_at: Utc::now(),
        };

        self.directory.insert(record.clone())?;

        dispatch(AccessEvent::UserRegistered {
            identity_id: record.identity_id.clone(),
            email: record.email.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(record)
    }
}
