use std::collections::BTreeMap;

use guardpost_domain::DashboardView;

use super::*;

impl AuthorizationService {
    /// Returns the views a role may open, in navigation order.
    ///
    /// A view is accessible when the role holds at least one of the
    /// permissions required by that view (logical OR). Views without
    /// requirements are listed for every role. No role means no views.
    #[must_use]
    pub fn accessible_views(&self, role: impl Into<Option<Role>>) -> Vec<DashboardView> {
        let Some(role) = role.into() else {
            return Vec::new();
        };

        DashboardView::all()
            .iter()
            .copied()
            .filter(|view| {
                let required = view.required_permissions();
                required.is_empty() || self.has_any_permission(role, required)
            })
            .collect()
    }

    /// Returns which actions of a view the role may see, keyed by action.
    #[must_use]
    pub fn view_action_flags(
        &self,
        role: impl Into<Option<Role>>,
        view: DashboardView,
    ) -> BTreeMap<&'static str, bool> {
        let role = role.into();
        view.actions()
            .iter()
            .map(|action| (action.key, self.has_permission(role, action.permission)))
            .collect()
    }
}
