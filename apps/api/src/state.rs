use std::sync::Arc;

use guardpost_application::{AuthSessionService, RouteGuard};
use guardpost_infrastructure::BufferedNotificationSink;

/// Shared application state.
///
/// The server hosts one operator console, so a single session service backs
/// every request.
#[derive(Clone)]
pub struct AppState {
    pub auth_session_service: AuthSessionService,
    pub route_guard: RouteGuard,
    pub notifications: Arc<BufferedNotificationSink>,
}
