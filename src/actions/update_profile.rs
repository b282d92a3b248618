use chrono::Utc;

use crate::directory::UserDirectory;
use crate::events::{dispatch, AccessEvent};
use crate::session::{Session, SessionStore};
use crate::storage::KeyValueStore;
use crate::validators::validate_email;
use crate::CoreError;

pub struct UpdateProfileAction<S: KeyValueStore> {
    directory: UserDirectory<S>,
    sessions: SessionStore<S>,
}

impl<S: KeyValueStore> UpdateProfileAction<S> {
    pub fn new(directory: UserDirectory<S>, sessions: SessionStore<S>) -> Self {
        UpdateProfileAction {
            directory,
            sessions,
        }
    }

    /// Saves profile changes for the logged-in identity.
    ///
    /// Updates the directory record and overwrites the active session so
    /// the client immediately reflects the new name and email. The auth
    /// token and role carry over unchanged.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(session))` - profile saved, session overwritten
    /// - `Ok(None)` - nobody is logged in
    /// - `Err(InvalidEmail)` - new email failed validation
    /// - `Err(UserAlreadyExists)` - new email belongs to another identity
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "update_profile", skip_all, err)
    )]
    pub async fn execute(
        &self,
        display_name: &str,
        email: &str,
    ) -> Result<Option<Session>, CoreError> {
        let Some(current) = self.sessions.current() else {
            return Ok(None);
        };

        validate_email(email).map_err(|_| CoreError::InvalidEmail)?;

        self.directory
            .update(&current.identity_id, display_name, email)?;

        let session = Session {
            display_name: display_name.to_owned(),
            email: email.to_owned(),
            ..current
        };
        self.sessions.save(&session)?;

        dispatch(AccessEvent::ProfileUpdated {
            identity_id: session.identity_id.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(Some(session))
    }
}
