use std::fmt::{Display, Formatter};
use std::str::FromStr;

use guardpost_core::AppError;
use serde::{Deserialize, Serialize};

/// Console roles. Each role resolves to a fixed permission set through the
/// [`crate::RolePermissionRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Unrestricted operator, including role management.
    SuperAdmin,
    /// Company administrator.
    Admin,
    /// Operations manager for guards, clients and deployments.
    Manager,
    /// Site supervisor handling shifts and attendance.
    Supervisor,
    /// Field staff with self-service access.
    Staff,
    /// Finance staff handling payroll and billing reports.
    Accountant,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super-admin",
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Supervisor => "supervisor",
            Self::Staff => "staff",
            Self::Accountant => "accountant",
        }
    }

    /// Returns the human-readable role name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Supervisor => "Supervisor",
            Self::Staff => "Staff",
            Self::Accountant => "Accountant",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::SuperAdmin,
            Role::Admin,
            Role::Manager,
            Role::Supervisor,
            Role::Staff,
            Role::Accountant,
        ];

        ALL
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown role value '{value}'")))
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Feature areas used to group permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionArea {
    /// Landing dashboard and analytics.
    Dashboard,
    /// Guard roster.
    Guards,
    /// Clients and contracts.
    Clients,
    /// Shift deployments.
    Deployments,
    /// Attendance tracking.
    Attendance,
    /// Payroll runs.
    Payroll,
    /// Reporting.
    Reports,
    /// Console user accounts.
    Users,
    /// System settings.
    Settings,
}

impl PermissionArea {
    /// Returns a stable storage value for this area.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Guards => "guards",
            Self::Clients => "clients",
            Self::Deployments => "deployments",
            Self::Attendance => "attendance",
            Self::Payroll => "payroll",
            Self::Reports => "reports",
            Self::Users => "users",
            Self::Settings => "settings",
        }
    }
}

/// Permissions enforced by route guards and conditional rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    /// Allows opening the dashboard.
    ViewDashboard,
    /// Allows reading dashboard analytics widgets.
    ViewAnalytics,
    /// Allows reading the guard roster.
    ViewGuards,
    /// Allows enrolling guards.
    CreateGuard,
    /// Allows editing guard records.
    EditGuard,
    /// Allows removing guards.
    DeleteGuard,
    /// Allows exporting the guard roster.
    ExportGuards,
    /// Allows reading clients.
    ViewClients,
    /// Allows creating clients.
    CreateClient,
    /// Allows editing clients.
    EditClient,
    /// Allows removing clients.
    DeleteClient,
    /// Allows managing client contracts.
    ManageContracts,
    /// Allows reading deployments.
    ViewDeployments,
    /// Allows creating deployments.
    CreateDeployment,
    /// Allows editing deployments.
    EditDeployment,
    /// Allows removing deployments.
    DeleteDeployment,
    /// Allows assigning guards to shifts.
    AssignShifts,
    /// Allows reading attendance.
    ViewAttendance,
    /// Allows marking attendance.
    MarkAttendance,
    /// Allows correcting attendance entries.
    EditAttendance,
    /// Allows approving attendance sheets.
    ApproveAttendance,
    /// Allows exporting attendance.
    ExportAttendance,
    /// Allows reading payroll.
    ViewPayroll,
    /// Allows running payroll.
    ProcessPayroll,
    /// Allows approving payroll runs.
    ApprovePayroll,
    /// Allows adjusting payroll entries.
    EditPayroll,
    /// Allows exporting payroll.
    ExportPayroll,
    /// Allows reading reports.
    ViewReports,
    /// Allows generating reports.
    GenerateReports,
    /// Allows exporting reports.
    ExportReports,
    /// Allows reading console users.
    ViewUsers,
    /// Allows creating console users.
    CreateUser,
    /// Allows editing console users.
    EditUser,
    /// Allows removing console users.
    DeleteUser,
    /// Allows changing role assignments.
    ManageRoles,
    /// Allows reading settings.
    ViewSettings,
    /// Allows changing settings.
    EditSettings,
    /// Allows configuring third-party integrations.
    ManageIntegrations,
    /// Allows managing backups.
    ManageBackups,
    /// Allows reading the audit log.
    ViewAuditLog,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "view-dashboard",
            Self::ViewAnalytics => "view-analytics",
            Self::ViewGuards => "view-guards",
            Self::CreateGuard => "create-guard",
            Self::EditGuard => "edit-guard",
            Self::DeleteGuard => "delete-guard",
            Self::ExportGuards => "export-guards",
            Self::ViewClients => "view-clients",
            Self::CreateClient => "create-client",
            Self::EditClient => "edit-client",
            Self::DeleteClient => "delete-client",
            Self::ManageContracts => "manage-contracts",
            Self::ViewDeployments => "view-deployments",
            Self::CreateDeployment => "create-deployment",
            Self::EditDeployment => "edit-deployment",
            Self::DeleteDeployment => "delete-deployment",
            Self::AssignShifts => "assign-shifts",
            Self::ViewAttendance => "view-attendance",
            Self::MarkAttendance => "mark-attendance",
            Self::EditAttendance => "edit-attendance",
            Self::ApproveAttendance => "approve-attendance",
            Self::ExportAttendance => "export-attendance",
            Self::ViewPayroll => "view-payroll",
            Self::ProcessPayroll => "process-payroll",
            Self::ApprovePayroll => "approve-payroll",
            Self::EditPayroll => "edit-payroll",
            Self::ExportPayroll => "export-payroll",
            Self::ViewReports => "view-reports",
            Self::GenerateReports => "generate-reports",
            Self::ExportReports => "export-reports",
            Self::ViewUsers => "view-users",
            Self::CreateUser => "create-user",
            Self::EditUser => "edit-user",
            Self::DeleteUser => "delete-user",
            Self::ManageRoles => "manage-roles",
            Self::ViewSettings => "view-settings",
            Self::EditSettings => "edit-settings",
            Self::ManageIntegrations => "manage-integrations",
            Self::ManageBackups => "manage-backups",
            Self::ViewAuditLog => "view-audit-log",
        }
    }

    /// Returns the feature area this permission belongs to.
    #[must_use]
    pub fn area(&self) -> PermissionArea {
        match self {
            Self::ViewDashboard | Self::ViewAnalytics => PermissionArea::Dashboard,
            Self::ViewGuards
            | Self::CreateGuard
            | Self::EditGuard
            | Self::DeleteGuard
            | Self::ExportGuards => PermissionArea::Guards,
            Self::ViewClients
            | Self::CreateClient
            | Self::EditClient
            | Self::DeleteClient
            | Self::ManageContracts => PermissionArea::Clients,
            Self::ViewDeployments
            | Self::CreateDeployment
            | Self::EditDeployment
            | Self::DeleteDeployment
            | Self::AssignShifts => PermissionArea::Deployments,
            Self::ViewAttendance
            | Self::MarkAttendance
            | Self::EditAttendance
            | Self::ApproveAttendance
            | Self::ExportAttendance => PermissionArea::Attendance,
            Self::ViewPayroll
            | Self::ProcessPayroll
            | Self::ApprovePayroll
            | Self::EditPayroll
            | Self::ExportPayroll => PermissionArea::Payroll,
            Self::ViewReports | Self::GenerateReports | Self::ExportReports => {
                PermissionArea::Reports
            }
            Self::ViewUsers
            | Self::CreateUser
            | Self::EditUser
            | Self::DeleteUser
            | Self::ManageRoles => PermissionArea::Users,
            Self::ViewSettings
            | Self::EditSettings
            | Self::ManageIntegrations
            | Self::ManageBackups
            | Self::ViewAuditLog => PermissionArea::Settings,
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ViewDashboard,
            Permission::ViewAnalytics,
            Permission::ViewGuards,
            Permission::CreateGuard,
            Permission::EditGuard,
            Permission::DeleteGuard,
            Permission::ExportGuards,
            Permission::ViewClients,
            Permission::CreateClient,
            Permission::EditClient,
            Permission::DeleteClient,
            Permission::ManageContracts,
            Permission::ViewDeployments,
            Permission::CreateDeployment,
            Permission::EditDeployment,
            Permission::DeleteDeployment,
            Permission::AssignShifts,
            Permission::ViewAttendance,
            Permission::MarkAttendance,
            Permission::EditAttendance,
            Permission::ApproveAttendance,
            Permission::ExportAttendance,
            Permission::ViewPayroll,
            Permission::ProcessPayroll,
            Permission::ApprovePayroll,
            Permission::EditPayroll,
            Permission::ExportPayroll,
            Permission::ViewReports,
            Permission::GenerateReports,
            Permission::ExportReports,
            Permission::ViewUsers,
            Permission::CreateUser,
            Permission::EditUser,
            Permission::DeleteUser,
            Permission::ManageRoles,
            Permission::ViewSettings,
            Permission::EditSettings,
            Permission::ManageIntegrations,
            Permission::ManageBackups,
            Permission::ViewAuditLog,
        ];

        ALL
    }

    /// Parses a transport value into a permission.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

impl Display for Permission {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use super::{Permission, PermissionArea, Role};

    #[test]
    fn permission_roundtrip_storage_value() {
        let permission = Permission::ProcessPayroll;
        let restored = Permission::from_str(permission.as_str());
        assert!(restored.is_ok());
        assert_eq!(restored.unwrap_or(Permission::ViewDashboard), permission);
    }

    #[test]
    fn unknown_permission_is_rejected() {
        let parsed = Permission::from_str("launch-rockets");
        assert!(parsed.is_err());
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("janitor").is_err());
        assert!(Role::from_str("Admin").is_err());
    }

    #[test]
    fn storage_values_are_unique() {
        let values: HashSet<&str> = Permission::all().iter().map(Permission::as_str).collect();
        assert_eq!(values.len(), Permission::all().len());
        assert_eq!(Permission::all().len(), 40);
    }

    #[test]
    fn serde_uses_storage_values() {
        for permission in Permission::all() {
            let encoded = serde_json::to_string(permission).unwrap_or_default();
            assert_eq!(encoded, format!("\"{}\"", permission.as_str()));
        }
        for role in Role::all() {
            let encoded = serde_json::to_string(role).unwrap_or_default();
            assert_eq!(encoded, format!("\"{}\"", role.as_str()));
        }
    }

    #[test]
    fn every_area_has_a_view_permission() {
        let areas: HashSet<PermissionArea> = Permission::all()
            .iter()
            .filter(|permission| permission.as_str().starts_with("view-"))
            .map(Permission::area)
            .collect();
        assert_eq!(areas.len(), 9);
    }
}
