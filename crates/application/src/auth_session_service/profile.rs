use chrono::Utc;
use guardpost_core::{AppError, AppResult};
use guardpost_domain::{ProfilePatch, UserProfile};

use crate::{Notification, SESSION_USER_KEY};

use super::login::encode_user;
use super::*;

impl AuthSessionService {
    /// Patches the signed-in user's profile.
    ///
    /// Role and status cannot be patched, so the session's permission set
    /// stays valid and is not recomputed.
    pub async fn update_profile(&self, patch: ProfilePatch) -> AppResult<UserProfile> {
        let _operation = self.operation_lock.lock().await;
        let session = self
            .current_session()
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

        let updated_at = Utc::now();
        let user = session.user().patched(&patch, updated_at);

        let stored = match encode_user(&user) {
            Ok(encoded) => self.session_store.set(&[(SESSION_USER_KEY, encoded)]).await,
            Err(error) => Err(error),
        };
        if let Err(error) = stored {
            self.notification_sink
                .notify(Notification::error("Failed to update profile"));
            return Err(error);
        }

        self.apply(SessionEvent::ProfileUpdated {
            token: session.token().clone(),
            patch,
            at: updated_at,
        });
        self.notification_sink
            .notify(Notification::success("Profile updated successfully"));

        Ok(user)
    }
}
