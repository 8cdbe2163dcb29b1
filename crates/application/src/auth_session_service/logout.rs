use guardpost_core::AppResult;

use crate::{Notification, SESSION_KEYS};

use super::*;

impl AuthSessionService {
    /// Signs out from any state.
    ///
    /// The in-memory state always ends `Unauthenticated`. An error is
    /// returned only when the durable store could not be cleared.
    pub async fn logout(&self) -> AppResult<()> {
        let _operation = self.operation_lock.lock().await;
        let cleared = self.session_store.clear(&SESSION_KEYS).await;
        self.apply(SessionEvent::LoggedOut);
        self.notification_sink
            .notify(Notification::success("You have been signed out"));
        cleared
    }
}
