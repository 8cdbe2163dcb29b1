//! Console session state machine.
//!
//! [`transition`] is the only way session state changes. It is pure so every
//! transition can be exercised without storage or a UI.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use guardpost_core::SessionToken;

use crate::{Permission, ProfilePatch, Role, RolePermissionRegistry, UserProfile};

/// An authenticated console session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: SessionToken,
    user: UserProfile,
    permissions: BTreeSet<Permission>,
}

impl Session {
    /// Establishes a session, resolving permissions from the user's role.
    ///
    /// This is the only place a session's permission set is computed.
    #[must_use]
    pub fn establish(
        user: UserProfile,
        token: SessionToken,
        registry: &RolePermissionRegistry,
    ) -> Self {
        let permissions = registry.permissions_for(user.role()).clone();
        Self {
            token,
            user,
            permissions,
        }
    }

    /// Returns the session token.
    #[must_use]
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Returns the signed-in user.
    #[must_use]
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Returns the role of the signed-in user.
    #[must_use]
    pub fn role(&self) -> Role {
        self.user.role()
    }

    /// Returns the permissions resolved when the session was established.
    #[must_use]
    pub fn permissions(&self) -> &BTreeSet<Permission> {
        &self.permissions
    }

    fn with_user(self, user: UserProfile) -> Self {
        Self { user, ..self }
    }
}

/// Session lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No one is signed in.
    Unauthenticated,
    /// A restore or sign-in is in progress; no access decision is possible yet.
    #[default]
    Loading,
    /// A user is signed in.
    Authenticated(Session),
}

impl SessionState {
    /// Returns whether a restore or sign-in is in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Unauthenticated | Self::Loading => None,
        }
    }

    /// Returns the role of the active session, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.session().map(Session::role)
    }
}

/// Events driving [`SessionState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Startup restore began.
    RestoreStarted,
    /// A persisted session was read back.
    Restored(Session),
    /// Nothing usable was persisted.
    RestoreFailed,
    /// A sign-in attempt began.
    LoginStarted,
    /// Credentials were accepted.
    LoginSucceeded(Session),
    /// Credentials were rejected.
    LoginFailed,
    /// The user signed out.
    LoggedOut,
    /// Profile fields of the session holding `token` were patched.
    ProfileUpdated {
        /// Session the patch was computed against.
        token: SessionToken,
        /// Applied fields.
        patch: ProfilePatch,
        /// Patch instant, stamped as `updated_at`.
        at: DateTime<Utc>,
    },
}

/// Applies an event to a state and returns the next state.
///
/// Events that do not apply to the current state leave it unchanged.
#[must_use]
pub fn transition(state: SessionState, event: SessionEvent) -> SessionState {
    match (state, event) {
        (SessionState::Authenticated(session), SessionEvent::RestoreStarted) => {
            SessionState::Authenticated(session)
        }
        (_, SessionEvent::RestoreStarted) => SessionState::Loading,
        (SessionState::Loading, SessionEvent::Restored(session)) => {
            SessionState::Authenticated(session)
        }
        (SessionState::Loading, SessionEvent::RestoreFailed) => SessionState::Unauthenticated,
        (_, SessionEvent::LoginStarted) => SessionState::Loading,
        (_, SessionEvent::LoginSucceeded(session)) => SessionState::Authenticated(session),
        (SessionState::Loading, SessionEvent::LoginFailed) => SessionState::Unauthenticated,
        (_, SessionEvent::LoggedOut) => SessionState::Unauthenticated,
        (
            SessionState::Authenticated(session),
            SessionEvent::ProfileUpdated { token, patch, at },
        ) if session.token() == &token => {
            let user = session.user().patched(&patch, at);
            SessionState::Authenticated(session.with_user(user))
        }
        (state, _) => state,
    }
}

#[cfg(test)]
mod tests;
