use chrono::Utc;

use crate::crypto::{generate_token, verify_password};
use crate::directory::UserDirectory;
use crate::events::{dispatch, AccessEvent};
use crate::session::{Session, SessionStore};
use crate::storage::KeyValueStore;
use crate::{CoreConfig, CoreError};

pub struct LoginAction<S: KeyValueStore> {
    directory: UserDirectory<S>,
    sessions: SessionStore<S>,
    config: CoreConfig,
}

impl<S: KeyValueStore> LoginAction<S> {
    pub fn new(directory: UserDirectory<S>, sessions: SessionStore<S>, config: CoreConfig) -> Self {
        LoginAction {
            directory,
            sessions,
            config,
        }
    }

    /// Logs a user in, creating the active session.
    ///
    /// On success the new [`Session`] carries a freshly generated auth
    /// token and replaces whatever session was active before.
    ///
    /// # Returns
    ///
    /// - `Ok(session)` - credentials verified, session saved
    /// - `Err(InvalidCredentials)` - unknown email or wrong password
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "login", skip_all, err)
    )]
    pub async fn execute(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        let Some(user) = self.directory.find_by_email(email) else {
            self.fail(email, "unknown email").await;
            return Err(CoreError::InvalidCredentials);
        };

        if !verify_password(password, &user.hashed_password).unwrap_or(false) {
            self.fail(email, "wrong password").await;
            return Err(CoreError::InvalidCredentials);
        }

        let session = Session {
            identity_id: user.identity_id.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            role: user.role,
            auth_token: generate_token(self.config.token_length),
        };

        self.sessions.save(&session)?;

        dispatch(AccessEvent::LoginSuccess {
            identity_id: session.identity_id.clone(),
            email: session.email.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "coursebound::auth",
            "msg=\"login success\" identity_id={}",
            session.identity_id
        );

        Ok(session)
    }

    async fn fail(&self, email: &str, reason: &str) {
        dispatch(AccessEvent::LoginFailed {
            email: email.to_owned(),
            reason: reason.to_owned(),
            at: Utc::now(),
        })
        .await;
    }
}

#[cfg(test)]
mod tests {
    use crate::actions::SignupAction;
    use crate::session::Role;
    use crate::storage::MemoryStore;

    use super::*;

    async fn fixture() -> (LoginAction<MemoryStore>, SessionStore<MemoryStore>) {
        let store = MemoryStore::new();
        let directory = UserDirectory::new(store.clone());
        let sessions = SessionStore::new(store);

        SignupAction::new(directory.clone())
            .execute("Test User", "user@example.com", "securepassword", Role::Student)
            .await
            .unwrap();

        (
            LoginAction::new(directory, sessions.clone(), CoreConfig::default()),
            sessions,
        )
    }

    #[tokio::test]
    async fn test_login_creates_session() {
        let (login, sessions) = fixture().await;

        let session = login
            .execute("user@example.com", "securepassword")
            .await
            .unwrap();

        assert_eq!(session.email, "user@example.com");
        assert_eq!(session.auth_token.len(), 32);
        assert_eq!(sessions.current(), Some(session));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (login, sessions) = fixture().await;

        let err = login
            .execute("user@example.com", "wrongpassword")
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::InvalidCredentials);
        assert!(sessions.current().is_none());
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let (login, _) = fixture().await;

        let err = login
            .execute("nobody@example.com", "securepassword")
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_replaces_previous_session() {
        let (login, sessions) = fixture().await;

        let first = login
            .execute("user@example.com", "securepassword")
            .await
            .unwrap();
        let second = login
            .execute("user@example.com", "securepassword")
            .await
            .unwrap();

        assert_ne!(first.auth_token, second.auth_token);
        assert_eq!(sessions.current(), Some(second));
    }
}
