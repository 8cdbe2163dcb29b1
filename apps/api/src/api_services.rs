use std::sync::Arc;

use guardpost_application::{AuthSessionService, AuthorizationService, RouteGuard, SessionStore};
use guardpost_core::AppError;
use guardpost_domain::RolePermissionRegistry;
use guardpost_infrastructure::{
    BufferedNotificationSink, FileSessionStore, InMemoryIdentityDirectory, InMemorySessionStore,
    load_role_registry,
};
use tracing::info;

use crate::api_config::{ApiConfig, SessionStoreConfig};
use crate::state::AppState;

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let registry = match &config.role_grants_path {
        Some(path) => load_role_registry(path).await?,
        None => RolePermissionRegistry::standard(),
    };
    let authorization_service = AuthorizationService::new(Arc::new(registry));

    let identity_directory =
        Arc::new(InMemoryIdentityDirectory::seeded()?.with_latency(config.login_latency));
    let session_store = build_session_store(&config.session_store);
    let notifications = Arc::new(BufferedNotificationSink::new());

    let auth_session_service = AuthSessionService::new(
        authorization_service.clone(),
        identity_directory,
        session_store,
        notifications.clone(),
    );

    Ok(AppState {
        auth_session_service,
        route_guard: RouteGuard::new(authorization_service, config.guard_destinations.clone()),
        notifications,
    })
}

fn build_session_store(config: &SessionStoreConfig) -> Arc<dyn SessionStore> {
    match config {
        SessionStoreConfig::Memory => {
            info!("using in-memory session store");
            Arc::new(InMemorySessionStore::new())
        }
        SessionStoreConfig::File(path) => {
            info!(path = %path.display(), "using file session store");
            Arc::new(FileSessionStore::new(path.clone()))
        }
    }
}
