use std::collections::BTreeMap;

use guardpost_domain::{DashboardView, Permission, UserProfile};
use serde::{Deserialize, Serialize};

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Navigation entry for a reachable view.
#[derive(Debug, Serialize)]
pub struct ViewLinkResponse {
    pub path: &'static str,
    pub label: &'static str,
}

impl From<DashboardView> for ViewLinkResponse {
    fn from(view: DashboardView) -> Self {
        Self {
            path: view.path(),
            label: view.label(),
        }
    }
}

/// Signed-in user with resolved permissions and navigation.
#[derive(Debug, Serialize)]
pub struct SessionUserResponse {
    pub user: UserProfile,
    pub role_display_name: &'static str,
    pub permissions: Vec<Permission>,
    pub views: Vec<ViewLinkResponse>,
}

/// Result of checking the signed-in role for one permission.
#[derive(Debug, Serialize)]
pub struct PermissionCheckResponse {
    pub permission: Permission,
    pub granted: bool,
}

/// Rendered dashboard view with per-action rendering flags.
#[derive(Debug, Serialize)]
pub struct DashboardViewResponse {
    pub view: &'static str,
    pub label: &'static str,
    pub actions: BTreeMap<String, bool>,
}

/// Query accepted by the sign-in page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginPageQuery {
    pub from: Option<String>,
}

/// Placeholder payload for redirect targets.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub page: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}
