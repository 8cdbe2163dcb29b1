use guardpost_core::SessionToken;
use guardpost_domain::UserProfile;
use tracing::{debug, warn};

use crate::{SESSION_KEYS, SESSION_TOKEN_KEY, SESSION_USER_KEY};

use super::*;

/// Result of restoring a persisted session at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// A well-formed session was read back and is now active.
    Restored(UserProfile),
    /// Nothing was persisted.
    NoSession,
    /// Persisted state was unusable and has been cleared.
    Discarded(AuthFailure),
}

impl AuthSessionService {
    /// Restores the persisted session, if any.
    ///
    /// Only a complete token and user pair is accepted. Anything else is
    /// treated as absent: the durable store is cleared and the state becomes
    /// `Unauthenticated`. Restore never emits notifications.
    pub async fn restore(&self) -> RestoreOutcome {
        let _operation = self.operation_lock.lock().await;
        if let Some(session) = self.current_session() {
            return RestoreOutcome::Restored(session.user().clone());
        }

        self.apply(SessionEvent::RestoreStarted);

        match self.read_persisted_session().await {
            Ok(Some(session)) => {
                let user = session.user().clone();
                self.apply(SessionEvent::Restored(session));
                debug!(user_id = %user.id(), role = %user.role(), "restored persisted session");
                RestoreOutcome::Restored(user)
            }
            Ok(None) => {
                self.apply(SessionEvent::RestoreFailed);
                RestoreOutcome::NoSession
            }
            Err(failure) => {
                if let Err(error) = self.session_store.clear(&SESSION_KEYS).await {
                    warn!(error = %error, "failed to clear unusable persisted session");
                }
                self.apply(SessionEvent::RestoreFailed);
                warn!(?failure, "discarded persisted session");
                RestoreOutcome::Discarded(failure)
            }
        }
    }

    async fn read_persisted_session(&self) -> Result<Option<Session>, AuthFailure> {
        let token = self.read_key(SESSION_TOKEN_KEY).await?;
        let user = self.read_key(SESSION_USER_KEY).await?;

        match (token, user) {
            (None, None) => Ok(None),
            (Some(token), Some(user)) if !token.trim().is_empty() => {
                let user: UserProfile = serde_json::from_str(user.as_str())
                    .map_err(|_| AuthFailure::MalformedSessionState)?;
                Ok(Some(Session::establish(
                    user,
                    SessionToken::from_stored(token),
                    self.authorization_service.registry(),
                )))
            }
            _ => Err(AuthFailure::MalformedSessionState),
        }
    }

    async fn read_key(&self, key: &str) -> Result<Option<String>, AuthFailure> {
        self.session_store.get(key).await.map_err(|error| {
            warn!(error = %error, key, "failed to read persisted session");
            AuthFailure::ServiceUnavailable
        })
    }
}
