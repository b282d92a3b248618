use chrono::Utc;

use crate::events::{dispatch, AccessEvent};
use crate::session::SessionStore;
use crate::storage::KeyValueStore;
use crate::CoreError;

pub struct LogoutAction<S: KeyValueStore> {
    sessions: SessionStore<S>,
}

impl<S: KeyValueStore> LogoutAction<S> {
    pub fn new(sessions: SessionStore<S>) -> Self {
        LogoutAction { sessions }
    }

    /// Logs out by destroying the active session.
    ///
    /// A no-op if nobody is logged in.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "logout", skip_all, err)
    )]
    pub async fn execute(&self) -> Result<(), CoreError> {
        // read first so the event can name the identity
        let identity_id = self.sessions.current().map(|s| s.identity_id);

        self.sessions.clear()?;

        if let Some(identity_id) = identity_id {
            dispatch(AccessEvent::LogoutSuccess {
                identity_id,
                at: Utc::now(),
            })
            .await;

            log::info!(
                target: "coursebound::auth",
                "msg=\"logout success\""
            );
        }

        Ok(())
    }
}
