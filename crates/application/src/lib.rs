//! Application services and ports.

#![forbid(unsafe_code)]

mod auth_session_service;
mod authorization_service;
mod route_guard;
mod session_ports;

pub use auth_session_service::{
    AuthFailure, AuthSessionService, LoginCredentials, LoginResult, RestoreOutcome,
};
pub use authorization_service::AuthorizationService;
pub use route_guard::{AccessRequirement, GuardDecision, GuardDestinations, RoleGate, RouteGuard};
pub use session_ports::{
    IdentityDirectory, Notification, NotificationLevel, NotificationSink, SESSION_KEYS,
    SESSION_TOKEN_KEY, SESSION_USER_KEY, SessionStore,
};
