use std::sync::Arc;

use guardpost_core::{AppError, AppResult};
use guardpost_domain::{Permission, Role, RolePermissionRegistry};

mod views;

/// Evaluates role permissions against an injected registry.
///
/// Role arguments accept `Option<Role>` so a missing role evaluates to
/// "not granted" rather than an error.
#[derive(Clone)]
pub struct AuthorizationService {
    registry: Arc<RolePermissionRegistry>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a registry.
    #[must_use]
    pub fn new(registry: Arc<RolePermissionRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the registry this service evaluates against.
    #[must_use]
    pub fn registry(&self) -> &RolePermissionRegistry {
        &self.registry
    }

    /// Returns whether the role holds the permission.
    #[must_use]
    pub fn has_permission(&self, role: impl Into<Option<Role>>, permission: Permission) -> bool {
        role.into().is_some_and(|role| self.registry.grants(role, permission))
    }

    /// Returns whether the role holds at least one permission. An empty
    /// list is never satisfied.
    #[must_use]
    pub fn has_any_permission(
        &self,
        role: impl Into<Option<Role>>,
        permissions: &[Permission],
    ) -> bool {
        let role = role.into();
        permissions
            .iter()
            .any(|permission| self.has_permission(role, *permission))
    }

    /// Returns whether the role holds every permission. An empty list is
    /// vacuously satisfied.
    #[must_use]
    pub fn has_all_permissions(
        &self,
        role: impl Into<Option<Role>>,
        permissions: &[Permission],
    ) -> bool {
        let role = role.into();
        permissions
            .iter()
            .all(|permission| self.has_permission(role, *permission))
    }

    /// Ensures the role holds the permission.
    pub fn require_permission(
        &self,
        role: impl Into<Option<Role>>,
        permission: Permission,
    ) -> AppResult<()> {
        let role = role.into();
        if self.has_permission(role, permission) {
            return Ok(());
        }

        let role_label = role.map_or("anonymous", |role| role.as_str());
        Err(AppError::Forbidden(format!(
            "role '{role_label}' is missing permission '{}'",
            permission.as_str()
        )))
    }
}
