use std::sync::Arc;

use axum::response::Response;
use guardpost_application::{
    AuthSessionService, AuthorizationService, GuardDestinations, LoginCredentials, RouteGuard,
};
use guardpost_domain::RolePermissionRegistry;
use guardpost_infrastructure::{
    BufferedNotificationSink, InMemoryIdentityDirectory, InMemorySessionStore,
};
use serde_json::Value;

use crate::state::AppState;

pub fn unrestored_state() -> AppState {
    let Ok(directory) = InMemoryIdentityDirectory::seeded() else {
        panic!("seeded directory should build");
    };
    let authorization_service =
        AuthorizationService::new(Arc::new(RolePermissionRegistry::standard()));
    let notifications = Arc::new(BufferedNotificationSink::new());

    AppState {
        auth_session_service: AuthSessionService::new(
            authorization_service.clone(),
            Arc::new(directory),
            Arc::new(InMemorySessionStore::new()),
            notifications.clone(),
        ),
        route_guard: RouteGuard::new(authorization_service, GuardDestinations::default()),
        notifications,
    }
}

pub async fn test_state() -> AppState {
    let state = unrestored_state();
    let _ = state.auth_session_service.restore().await;
    state
}

pub async fn signed_in_state(email: &str, password: &str) -> AppState {
    let state = test_state().await;
    let result = state
        .auth_session_service
        .login(LoginCredentials {
            email: email.to_owned(),
            password: password.to_owned(),
        })
        .await;
    assert!(result.is_authenticated(), "seeded login should succeed");
    state
}

pub async fn response_json(response: Response) -> Value {
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("response body should be readable");
    };
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}
