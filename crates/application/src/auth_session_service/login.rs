use guardpost_core::{AppError, AppResult, SessionToken};
use guardpost_domain::UserProfile;
use tracing::warn;

use crate::{Notification, SESSION_KEYS, SESSION_TOKEN_KEY, SESSION_USER_KEY};

use super::*;

/// Email and secret submitted on the sign-in form.
#[derive(Clone, Deserialize)]
pub struct LoginCredentials {
    /// Account email, matched exactly.
    pub email: String,
    /// Account secret, matched exactly.
    pub password: String,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a sign-in attempt. Failures are values, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginResult {
    /// A session was established for the sanitized user.
    Authenticated {
        /// Signed-in user without the secret.
        user: UserProfile,
    },
    /// The attempt was rejected and the state is `Unauthenticated`.
    Rejected {
        /// Failure category.
        failure: AuthFailure,
        /// Message suitable for display.
        message: String,
    },
}

impl LoginResult {
    /// Returns whether a session was established.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

impl AuthSessionService {
    /// Signs in with exact email and secret.
    ///
    /// A successful attempt replaces any active session. A rejected attempt
    /// leaves the state `Unauthenticated` and clears a displaced session
    /// from the durable store.
    pub async fn login(&self, credentials: LoginCredentials) -> LoginResult {
        let _operation = self.operation_lock.lock().await;
        let displaced_session = self.state().is_authenticated();
        self.apply(SessionEvent::LoginStarted);

        let lookup = self
            .identity_directory
            .find_by_credentials(&credentials.email, &credentials.password)
            .await;

        let identity = match lookup {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                return self
                    .reject_login(AuthFailure::InvalidCredentials, displaced_session)
                    .await;
            }
            Err(error) => {
                warn!(error = %error, "identity directory lookup failed");
                return self
                    .reject_login(AuthFailure::ServiceUnavailable, displaced_session)
                    .await;
            }
        };

        let user = identity.into_profile();
        let session = Session::establish(
            user.clone(),
            SessionToken::issue(),
            self.authorization_service.registry(),
        );

        if let Err(error) = self.persist_session(&session).await {
            warn!(error = %error, user_id = %user.id(), "failed to persist session");
            return self
                .reject_login(AuthFailure::ServiceUnavailable, displaced_session)
                .await;
        }

        self.apply(SessionEvent::LoginSucceeded(session));
        self.notification_sink.notify(Notification::success(format!(
            "Welcome back, {}!",
            user.name()
        )));

        LoginResult::Authenticated { user }
    }

    async fn persist_session(&self, session: &Session) -> AppResult<()> {
        let user = encode_user(session.user())?;
        self.session_store
            .set(&[
                (SESSION_TOKEN_KEY, session.token().as_str().to_owned()),
                (SESSION_USER_KEY, user),
            ])
            .await
    }

    async fn reject_login(&self, failure: AuthFailure, displaced_session: bool) -> LoginResult {
        if displaced_session && let Err(error) = self.session_store.clear(&SESSION_KEYS).await {
            warn!(error = %error, "failed to clear displaced session");
        }

        self.apply(SessionEvent::LoginFailed);

        let message = match failure {
            AuthFailure::InvalidCredentials => "Invalid email or password",
            AuthFailure::MalformedSessionState | AuthFailure::ServiceUnavailable => {
                "Sign-in is temporarily unavailable"
            }
        };
        self.notification_sink.notify(Notification::error(message));

        LoginResult::Rejected {
            failure,
            message: message.to_owned(),
        }
    }
}

pub(super) fn encode_user(user: &UserProfile) -> AppResult<String> {
    serde_json::to_string(user)
        .map_err(|error| AppError::Internal(format!("failed to encode session user: {error}")))
}
