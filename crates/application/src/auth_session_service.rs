//! Console sign-in lifecycle.
//!
//! Owns the single in-memory [`SessionState`] of this process together with
//! the durable session store. Every durable write or clear completes before
//! the matching in-memory transition is applied, so readers of the state
//! never observe a session the store does not hold.
//!
//! Login, logout, restore and profile updates run one at a time: each holds
//! the operation lock from its first transition until its last, so a store
//! write always belongs to the session that is current when it lands.

use std::sync::{Arc, PoisonError, RwLock};

use guardpost_domain::{Session, SessionEvent, SessionState, transition};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{AuthorizationService, IdentityDirectory, NotificationSink, SessionStore};

mod login;
mod logout;
mod profile;
mod restore;

pub use login::{LoginCredentials, LoginResult};
pub use restore::RestoreOutcome;

/// Recoverable sign-in and restore failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFailure {
    /// No active account matches the credentials.
    InvalidCredentials,
    /// The persisted session could not be read back.
    MalformedSessionState,
    /// The directory or session store failed.
    ServiceUnavailable,
}

/// Application service driving login, logout, restore and profile updates.
#[derive(Clone)]
pub struct AuthSessionService {
    authorization_service: AuthorizationService,
    identity_directory: Arc<dyn IdentityDirectory>,
    session_store: Arc<dyn SessionStore>,
    notification_sink: Arc<dyn NotificationSink>,
    state: Arc<RwLock<SessionState>>,
    operation_lock: Arc<Mutex<()>>,
}

impl AuthSessionService {
    /// Creates a service in the `Loading` state; call [`Self::restore`] next.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        identity_directory: Arc<dyn IdentityDirectory>,
        session_store: Arc<dyn SessionStore>,
        notification_sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            authorization_service,
            identity_directory,
            session_store,
            notification_sink,
            state: Arc::new(RwLock::new(SessionState::Loading)),
            operation_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns a snapshot of the current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the active session, if any.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.state().session().cloned()
    }

    /// Returns the authorization service used to resolve permissions.
    #[must_use]
    pub fn authorization_service(&self) -> &AuthorizationService {
        &self.authorization_service
    }

    fn apply(&self, event: SessionEvent) -> SessionState {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let current = std::mem::take(&mut *state);
        *state = transition(current, event);
        state.clone()
    }
}
