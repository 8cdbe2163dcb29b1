use serde::{Deserialize, Serialize};

use crate::Permission;

/// Navigable console views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardView {
    /// Landing dashboard.
    Dashboard,
    /// Guard roster.
    Guards,
    /// Clients and contracts.
    Clients,
    /// Shift deployments.
    Deployments,
    /// Attendance sheets.
    Attendance,
    /// Payroll runs.
    Payroll,
    /// Reports.
    Reports,
    /// Console user administration.
    Users,
    /// System settings.
    Settings,
    /// The signed-in user's own profile.
    Profile,
}

/// A UI action inside a view, rendered only when its permission is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewAction {
    /// Stable action key, e.g. `create` or `export`.
    pub key: &'static str,
    /// Permission gating the action.
    pub permission: Permission,
}

impl DashboardView {
    /// Returns all views in navigation order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[DashboardView] = &[
            DashboardView::Dashboard,
            DashboardView::Guards,
            DashboardView::Clients,
            DashboardView::Deployments,
            DashboardView::Attendance,
            DashboardView::Payroll,
            DashboardView::Reports,
            DashboardView::Users,
            DashboardView::Settings,
            DashboardView::Profile,
        ];

        ALL
    }

    /// Returns the route path of the view.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Guards => "/guards",
            Self::Clients => "/clients",
            Self::Deployments => "/deployments",
            Self::Attendance => "/attendance",
            Self::Payroll => "/payroll",
            Self::Reports => "/reports",
            Self::Users => "/users",
            Self::Settings => "/settings",
            Self::Profile => "/profile",
        }
    }

    /// Returns the navigation label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Guards => "Guards",
            Self::Clients => "Clients",
            Self::Deployments => "Deployments",
            Self::Attendance => "Attendance",
            Self::Payroll => "Payroll",
            Self::Reports => "Reports",
            Self::Users => "Users",
            Self::Settings => "Settings",
            Self::Profile => "My Profile",
        }
    }

    /// Returns the permissions that open this view. Holding any one of them
    /// is sufficient; an empty list means no restriction.
    #[must_use]
    pub fn required_permissions(&self) -> &'static [Permission] {
        match self {
            Self::Dashboard => &[Permission::ViewDashboard],
            Self::Guards => &[Permission::ViewGuards],
            Self::Clients => &[Permission::ViewClients],
            Self::Deployments => &[Permission::ViewDeployments],
            Self::Attendance => &[Permission::ViewAttendance],
            Self::Payroll => &[Permission::ViewPayroll],
            Self::Reports => &[Permission::ViewReports],
            Self::Users => &[Permission::ViewUsers],
            Self::Settings => &[Permission::ViewSettings, Permission::ViewAuditLog],
            Self::Profile => &[],
        }
    }

    /// Returns the permission-gated actions rendered inside the view.
    #[must_use]
    pub fn actions(&self) -> &'static [ViewAction] {
        match self {
            Self::Dashboard => &[ViewAction {
                key: "analytics",
                permission: Permission::ViewAnalytics,
            }],
            Self::Guards => &[
                ViewAction {
                    key: "create",
                    permission: Permission::CreateGuard,
                },
                ViewAction {
                    key: "edit",
                    permission: Permission::EditGuard,
                },
                ViewAction {
                    key: "delete",
                    permission: Permission::DeleteGuard,
                },
                ViewAction {
                    key: "export",
                    permission: Permission::ExportGuards,
                },
            ],
            Self::Clients => &[
                ViewAction {
                    key: "create",
                    permission: Permission::CreateClient,
                },
                ViewAction {
                    key: "edit",
                    permission: Permission::EditClient,
                },
                ViewAction {
                    key: "delete",
                    permission: Permission::DeleteClient,
                },
                ViewAction {
                    key: "contracts",
                    permission: Permission::ManageContracts,
                },
            ],
            Self::Deployments => &[
                ViewAction {
                    key: "create",
                    permission: Permission::CreateDeployment,
                },
                ViewAction {
                    key: "edit",
                    permission: Permission::EditDeployment,
                },
                ViewAction {
                    key: "delete",
                    permission: Permission::DeleteDeployment,
                },
                ViewAction {
                    key: "assign",
                    permission: Permission::AssignShifts,
                },
            ],
            Self::Attendance => &[
                ViewAction {
                    key: "mark",
                    permission: Permission::MarkAttendance,
                },
                ViewAction {
                    key: "edit",
                    permission: Permission::EditAttendance,
                },
                ViewAction {
                    key: "approve",
                    permission: Permission::ApproveAttendance,
                },
                ViewAction {
                    key: "export",
                    permission: Permission::ExportAttendance,
                },
            ],
            Self::Payroll => &[
                ViewAction {
                    key: "process",
                    permission: Permission::ProcessPayroll,
                },
                ViewAction {
                    key: "approve",
                    permission: Permission::ApprovePayroll,
                },
                ViewAction {
                    key: "edit",
                    permission: Permission::EditPayroll,
                },
                ViewAction {
                    key: "export",
                    permission: Permission::ExportPayroll,
                },
            ],
            Self::Reports => &[
                ViewAction {
                    key: "generate",
                    permission: Permission::GenerateReports,
                },
                ViewAction {
                    key: "export",
                    permission: Permission::ExportReports,
                },
            ],
            Self::Users => &[
                ViewAction {
                    key: "create",
                    permission: Permission::CreateUser,
                },
                ViewAction {
                    key: "edit",
                    permission: Permission::EditUser,
                },
                ViewAction {
                    key: "delete",
                    permission: Permission::DeleteUser,
                },
                ViewAction {
                    key: "roles",
                    permission: Permission::ManageRoles,
                },
            ],
            Self::Settings => &[
                ViewAction {
                    key: "edit",
                    permission: Permission::EditSettings,
                },
                ViewAction {
                    key: "integrations",
                    permission: Permission::ManageIntegrations,
                },
                ViewAction {
                    key: "backups",
                    permission: Permission::ManageBackups,
                },
                ViewAction {
                    key: "audit_log",
                    permission: Permission::ViewAuditLog,
                },
            ],
            Self::Profile => &[],
        }
    }

    /// Finds the view served at a route path.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::all().iter().copied().find(|view| view.path() == path)
    }
}
