//! Role to permission grants.
//!
//! The registry is an immutable value built once at startup and shared by
//! the evaluator, the session manager and the route guard. A role missing
//! from the registry resolves to the empty set.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::str::FromStr;

use guardpost_core::{AppError, AppResult};

use crate::{Permission, Role};

static NO_GRANTS: BTreeSet<Permission> = BTreeSet::new();

const MANAGER_GRANTS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewAnalytics,
    Permission::ViewGuards,
    Permission::CreateGuard,
    Permission::EditGuard,
    Permission::ExportGuards,
    Permission::ViewClients,
    Permission::CreateClient,
    Permission::EditClient,
    Permission::ManageContracts,
    Permission::ViewDeployments,
    Permission::CreateDeployment,
    Permission::EditDeployment,
    Permission::AssignShifts,
    Permission::ViewAttendance,
    Permission::MarkAttendance,
    Permission::EditAttendance,
    Permission::ApproveAttendance,
    Permission::ExportAttendance,
    Permission::ViewPayroll,
    Permission::ViewReports,
    Permission::GenerateReports,
    Permission::ExportReports,
    Permission::ViewUsers,
    Permission::ViewSettings,
];

const SUPERVISOR_GRANTS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewGuards,
    Permission::ViewClients,
    Permission::ViewDeployments,
    Permission::AssignShifts,
    Permission::ViewAttendance,
    Permission::MarkAttendance,
    Permission::EditAttendance,
    Permission::ViewReports,
];

const STAFF_GRANTS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewDeployments,
    Permission::ViewAttendance,
    Permission::MarkAttendance,
];

const ACCOUNTANT_GRANTS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewAnalytics,
    Permission::ViewGuards,
    Permission::ViewClients,
    Permission::ViewAttendance,
    Permission::ExportAttendance,
    Permission::ViewPayroll,
    Permission::ProcessPayroll,
    Permission::ApprovePayroll,
    Permission::EditPayroll,
    Permission::ExportPayroll,
    Permission::ViewReports,
    Permission::GenerateReports,
    Permission::ExportReports,
];

/// Platform-level permissions withheld from the company admin role.
const SUPER_ADMIN_ONLY: &[Permission] = &[
    Permission::ManageRoles,
    Permission::ManageIntegrations,
    Permission::ManageBackups,
];

/// Immutable mapping from role to its granted permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePermissionRegistry {
    grants: HashMap<Role, BTreeSet<Permission>>,
}

impl RolePermissionRegistry {
    /// Builds the registry shipped with the console.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_grants(
            Role::all()
                .iter()
                .map(|role| (*role, standard_grants(*role))),
        )
    }

    /// Builds a registry from explicit grants. Later entries for the same
    /// role replace earlier ones.
    #[must_use]
    pub fn from_grants<I, P>(grants: I) -> Self
    where
        I: IntoIterator<Item = (Role, P)>,
        P: IntoIterator<Item = Permission>,
    {
        Self {
            grants: grants
                .into_iter()
                .map(|(role, permissions)| (role, permissions.into_iter().collect()))
                .collect(),
        }
    }

    /// Parses a JSON grant document of the form `{"admin": ["view-guards"]}`.
    ///
    /// Unknown role or permission values are rejected. Roles absent from
    /// the document keep no permissions.
    pub fn from_json(document: &str) -> AppResult<Self> {
        let raw: BTreeMap<String, Vec<String>> =
            serde_json::from_str(document).map_err(|error| {
                AppError::Validation(format!("invalid role grant document: {error}"))
            })?;

        let mut grants = Vec::with_capacity(raw.len());
        for (role_value, permission_values) in raw {
            let role = Role::from_str(role_value.as_str())?;
            let permissions = permission_values
                .iter()
                .map(|value| Permission::from_str(value.as_str()))
                .collect::<AppResult<Vec<_>>>()?;
            grants.push((role, permissions));
        }

        Ok(Self::from_grants(grants))
    }

    /// Returns the permissions granted to a role.
    #[must_use]
    pub fn permissions_for(&self, role: Role) -> &BTreeSet<Permission> {
        self.grants.get(&role).unwrap_or(&NO_GRANTS)
    }

    /// Returns whether a role is granted a permission.
    #[must_use]
    pub fn grants(&self, role: Role, permission: Permission) -> bool {
        self.permissions_for(role).contains(&permission)
    }

    /// Returns the roles with an entry in this registry.
    #[must_use]
    pub fn roles(&self) -> BTreeSet<Role> {
        self.grants.keys().copied().collect()
    }
}

fn standard_grants(role: Role) -> Vec<Permission> {
    match role {
        Role::SuperAdmin => Permission::all().to_vec(),
        Role::Admin => Permission::all()
            .iter()
            .copied()
            .filter(|permission| !SUPER_ADMIN_ONLY.contains(permission))
            .collect(),
        Role::Manager => MANAGER_GRANTS.to_vec(),
        Role::Supervisor => SUPERVISOR_GRANTS.to_vec(),
        Role::Staff => STAFF_GRANTS.to_vec(),
        Role::Accountant => ACCOUNTANT_GRANTS.to_vec(),
    }
}
