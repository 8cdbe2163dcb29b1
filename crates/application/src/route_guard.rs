//! Navigation and rendering guards.
//!
//! Guards only compute decisions. Callers act on them: render, redirect or
//! show a placeholder.

use std::collections::BTreeSet;

use guardpost_domain::{DashboardView, Permission, Role, SessionState};
use url::form_urlencoded;

use crate::AuthorizationService;

/// Permissions required to open a protected location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessRequirement {
    permissions: Vec<Permission>,
    require_all: bool,
}

impl AccessRequirement {
    /// Requires only an authenticated session.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Requires at least one of the permissions.
    #[must_use]
    pub fn any(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            permissions: permissions.into_iter().collect(),
            require_all: false,
        }
    }

    /// Requires every permission.
    #[must_use]
    pub fn all(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            permissions: permissions.into_iter().collect(),
            require_all: true,
        }
    }

    /// Returns the requirement guarding a console view.
    #[must_use]
    pub fn for_view(view: DashboardView) -> Self {
        Self::any(view.required_permissions().iter().copied())
    }

    /// Returns the required permissions.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Returns whether every permission is required.
    #[must_use]
    pub fn require_all(&self) -> bool {
        self.require_all
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session is still loading; show a placeholder and decide later.
    Pending,
    /// No session; send the user to sign in and come back afterwards.
    RedirectToLogin {
        /// Sign-in location.
        login_path: String,
        /// Originally requested location.
        return_to: String,
    },
    /// Access granted.
    Granted,
    /// Session lacks the required permissions.
    RedirectToUnauthorized {
        /// Access-denied location.
        path: String,
    },
}

impl GuardDecision {
    /// Returns whether access was granted.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Returns the redirect location, `?from=` included for sign-in redirects.
    #[must_use]
    pub fn redirect_target(&self) -> Option<String> {
        match self {
            Self::RedirectToLogin {
                login_path,
                return_to,
            } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("from", return_to)
                    .finish();
                Some(format!("{login_path}?{query}"))
            }
            Self::RedirectToUnauthorized { path } => Some(path.clone()),
            Self::Pending | Self::Granted => None,
        }
    }
}

/// Locations guards redirect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDestinations {
    /// Sign-in entry point.
    pub login_path: String,
    /// Access-denied page.
    pub unauthorized_path: String,
}

impl Default for GuardDestinations {
    fn default() -> Self {
        Self {
            login_path: "/login".to_owned(),
            unauthorized_path: "/unauthorized".to_owned(),
        }
    }
}

/// Decides whether a session may open a protected location.
#[derive(Clone)]
pub struct RouteGuard {
    authorization_service: AuthorizationService,
    destinations: GuardDestinations,
}

impl RouteGuard {
    /// Creates a guard over an authorization service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        destinations: GuardDestinations,
    ) -> Self {
        Self {
            authorization_service,
            destinations,
        }
    }

    /// Returns the configured redirect destinations.
    #[must_use]
    pub fn destinations(&self) -> &GuardDestinations {
        &self.destinations
    }

    /// Evaluates a requirement against the current session state.
    ///
    /// Authentication is checked before the requirement, so an empty
    /// requirement still sends anonymous visitors to sign in.
    #[must_use]
    pub fn evaluate(
        &self,
        requirement: &AccessRequirement,
        state: &SessionState,
        requested_location: &str,
    ) -> GuardDecision {
        let session = match state {
            SessionState::Loading => return GuardDecision::Pending,
            SessionState::Unauthenticated => {
                return GuardDecision::RedirectToLogin {
                    login_path: self.destinations.login_path.clone(),
                    return_to: requested_location.to_owned(),
                };
            }
            SessionState::Authenticated(session) => session,
        };

        if requirement.permissions.is_empty() {
            return GuardDecision::Granted;
        }

        let role = session.role();
        let allowed = if requirement.require_all {
            self.authorization_service
                .has_all_permissions(role, &requirement.permissions)
        } else {
            self.authorization_service
                .has_any_permission(role, &requirement.permissions)
        };

        if allowed {
            GuardDecision::Granted
        } else {
            GuardDecision::RedirectToUnauthorized {
                path: self.destinations.unauthorized_path.clone(),
            }
        }
    }
}

/// Non-redirecting role check for conditional UI fragments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleGate {
    roles: BTreeSet<Role>,
}

impl RoleGate {
    /// Creates a gate accepting the given roles. No roles means no restriction.
    #[must_use]
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }

    /// Returns whether content should render for the role.
    #[must_use]
    pub fn allows(&self, role: impl Into<Option<Role>>) -> bool {
        if self.roles.is_empty() {
            return true;
        }

        role.into().is_some_and(|role| self.roles.contains(&role))
    }

    /// Returns `content` when allowed, otherwise `fallback`.
    #[must_use]
    pub fn select<T>(
        &self,
        role: impl Into<Option<Role>>,
        content: T,
        fallback: Option<T>,
    ) -> Option<T> {
        if self.allows(role) {
            Some(content)
        } else {
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use guardpost_core::{NonEmptyString, SessionToken};
    use guardpost_domain::{
        AccountStatus, EmailAddress, Permission, Role, RolePermissionRegistry, Session,
        SessionState, UserId, UserProfile,
    };

    use super::{AccessRequirement, GuardDecision, GuardDestinations, RoleGate, RouteGuard};
    use crate::AuthorizationService;

    fn scenario_registry() -> RolePermissionRegistry {
        RolePermissionRegistry::from_grants([(
            Role::Admin,
            [Permission::ViewDashboard, Permission::ViewGuards],
        )])
    }

    fn guard() -> RouteGuard {
        RouteGuard::new(
            AuthorizationService::new(Arc::new(scenario_registry())),
            GuardDestinations::default(),
        )
    }

    fn signed_in(role: Role) -> SessionState {
        let (Ok(name), Ok(email)) = (
            NonEmptyString::new("Yaw Darko"),
            EmailAddress::new("admin@x.com"),
        ) else {
            panic!("fixture values should be valid");
        };
        let now = Utc::now();
        let user = UserProfile::new(
            UserId::new(7),
            name,
            email,
            "",
            role,
            AccountStatus::Active,
            now,
            now,
        );
        SessionState::Authenticated(Session::establish(
            user,
            SessionToken::issue(),
            &scenario_registry(),
        ))
    }

    #[test]
    fn loading_session_is_pending() {
        let decision = guard().evaluate(
            &AccessRequirement::any([Permission::ViewGuards]),
            &SessionState::Loading,
            "/guards",
        );
        assert_eq!(decision, GuardDecision::Pending);
    }

    #[test]
    fn anonymous_visit_redirects_to_login_with_return_location() {
        for requirement in [
            AccessRequirement::none(),
            AccessRequirement::any([Permission::ViewGuards]),
        ] {
            let decision = guard().evaluate(
                &requirement,
                &SessionState::Unauthenticated,
                "/guards?page=2",
            );
            assert_eq!(
                decision,
                GuardDecision::RedirectToLogin {
                    login_path: "/login".to_owned(),
                    return_to: "/guards?page=2".to_owned(),
                }
            );
        }
    }

    #[test]
    fn empty_requirement_grants_any_signed_in_role() {
        for role in Role::all() {
            let decision =
                guard().evaluate(&AccessRequirement::none(), &signed_in(*role), "/profile");
            assert!(decision.is_granted());

            let require_all_empty = guard().evaluate(
                &AccessRequirement::all(Vec::new()),
                &signed_in(*role),
                "/profile",
            );
            assert!(require_all_empty.is_granted());
        }
    }

    #[test]
    fn scenario_admin_guards() {
        let state = signed_in(Role::Admin);

        let guards = guard().evaluate(
            &AccessRequirement::any([Permission::ViewGuards]),
            &state,
            "/guards",
        );
        assert_eq!(guards, GuardDecision::Granted);

        let roles = guard().evaluate(
            &AccessRequirement::any([Permission::ManageRoles]),
            &state,
            "/users/roles",
        );
        assert_eq!(
            roles,
            GuardDecision::RedirectToUnauthorized {
                path: "/unauthorized".to_owned(),
            }
        );
    }

    #[test]
    fn require_all_needs_every_permission() {
        let state = signed_in(Role::Admin);
        let permissions = [Permission::ViewGuards, Permission::ManageRoles];

        assert!(
            guard()
                .evaluate(&AccessRequirement::any(permissions), &state, "/x")
                .is_granted()
        );
        assert!(
            !guard()
                .evaluate(&AccessRequirement::all(permissions), &state, "/x")
                .is_granted()
        );
    }

    #[test]
    fn custom_destinations_are_used() {
        let guard = RouteGuard::new(
            AuthorizationService::new(Arc::new(scenario_registry())),
            GuardDestinations {
                login_path: "/signin".to_owned(),
                unauthorized_path: "/denied".to_owned(),
            },
        );

        let denied = guard.evaluate(
            &AccessRequirement::any([Permission::ProcessPayroll]),
            &signed_in(Role::Admin),
            "/payroll",
        );
        assert_eq!(
            denied,
            GuardDecision::RedirectToUnauthorized {
                path: "/denied".to_owned(),
            }
        );
    }

    #[test]
    fn redirect_targets_carry_the_requested_location() {
        let login = guard().evaluate(
            &AccessRequirement::none(),
            &SessionState::Unauthenticated,
            "/guards?page=2",
        );
        assert_eq!(
            login.redirect_target().as_deref(),
            Some("/login?from=%2Fguards%3Fpage%3D2")
        );
        let return_to = login.redirect_target().and_then(|target| {
            let (_, query) = target.split_once('?')?;
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "from")
                .map(|(_, value)| value.into_owned())
        });
        assert_eq!(return_to.as_deref(), Some("/guards?page=2"));

        let denied = guard().evaluate(
            &AccessRequirement::any([Permission::ManageRoles]),
            &signed_in(Role::Admin),
            "/users",
        );
        assert_eq!(denied.redirect_target().as_deref(), Some("/unauthorized"));
        assert_eq!(GuardDecision::Pending.redirect_target(), None);
        assert_eq!(GuardDecision::Granted.redirect_target(), None);
    }

    #[test]
    fn role_gate_renders_content_or_fallback() {
        let gate = RoleGate::new([Role::Admin, Role::SuperAdmin]);

        assert_eq!(gate.select(Role::Admin, "actions", None), Some("actions"));
        assert_eq!(gate.select(Role::Staff, "actions", None), None);
        assert_eq!(
            gate.select(Role::Staff, "actions", Some("read-only")),
            Some("read-only")
        );
        assert!(!gate.allows(None::<Role>));
    }

    #[test]
    fn empty_role_gate_is_unrestricted() {
        let gate = RoleGate::default();
        assert!(gate.allows(Role::Staff));
        assert!(gate.allows(None::<Role>));
    }
}
