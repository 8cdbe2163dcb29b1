//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod registry;
mod security;
mod session;
mod user;
mod view;

pub use registry::RolePermissionRegistry;
pub use security::{Permission, PermissionArea, Role};
pub use session::{Session, SessionEvent, SessionState, transition};
pub use user::{AccountStatus, EmailAddress, Identity, ProfilePatch, UserId, UserProfile};
pub use view::{DashboardView, ViewAction};
