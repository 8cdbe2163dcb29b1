use std::path::Path;

use guardpost_core::{AppError, AppResult};
use guardpost_domain::RolePermissionRegistry;
use tracing::info;

/// Loads a role-permission registry from a JSON grants file.
///
/// The file maps role storage values to permission storage values, for
/// example `{"staff": ["view-dashboard", "view-attendance"]}`. Roles absent
/// from the file hold no permissions.
pub async fn load_role_registry(path: &Path) -> AppResult<RolePermissionRegistry> {
    let document = tokio::fs::read_to_string(path).await.map_err(|error| {
        AppError::Validation(format!(
            "failed to read role grants '{}': {error}",
            path.display()
        ))
    })?;

    let registry = RolePermissionRegistry::from_json(&document)?;
    info!(
        path = %path.display(),
        roles = registry.roles().len(),
        "loaded role grants"
    );

    Ok(registry)
}
