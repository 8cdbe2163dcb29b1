use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use guardpost_application::{AccessRequirement, GuardDecision};
use guardpost_core::AppError;
use guardpost_domain::DashboardView;
use tracing::debug;

use crate::dto::DashboardViewResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn dashboard_view_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let Some(view) = DashboardView::from_path(uri.path()) else {
        return ApiError::from(AppError::NotFound(format!("no view at '{}'", uri.path())))
            .into_response();
    };

    let requested_location = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |location| location.as_str());
    let session_state = state.auth_session_service.state();
    let decision = state.route_guard.evaluate(
        &AccessRequirement::for_view(view),
        &session_state,
        requested_location,
    );

    if !decision.is_granted() {
        debug!(view = view.path(), ?decision, "view not rendered");
    }

    match decision {
        GuardDecision::Granted => {
            let actions = state
                .auth_session_service
                .authorization_service()
                .view_action_flags(session_state.role(), view)
                .into_iter()
                .map(|(key, allowed)| (format!("can_{key}"), allowed))
                .collect();

            Json(DashboardViewResponse {
                view: view.path(),
                label: view.label(),
                actions,
            })
            .into_response()
        }
        GuardDecision::Pending => ApiError::SessionLoading.into_response(),
        redirect => match redirect.redirect_target() {
            Some(target) => Redirect::to(&target).into_response(),
            None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        },
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use axum::http::{StatusCode, Uri, header};

    use super::dashboard_view_handler;
    use crate::test_support::{response_json, signed_in_state, test_state, unrestored_state};

    fn location(response: &axum::response::Response) -> Option<&str> {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn loading_session_asks_to_retry() {
        let state = unrestored_state();
        let response = dashboard_view_handler(State(state), Uri::from_static("/guards")).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.headers().contains_key(header::RETRY_AFTER));
    }

    #[tokio::test]
    async fn anonymous_visit_redirects_to_login() {
        let state = test_state().await;
        let response =
            dashboard_view_handler(State(state), Uri::from_static("/guards?page=2")).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/login?from=%2Fguards%3Fpage%3D2"));
    }

    #[tokio::test]
    async fn profile_is_open_to_every_signed_in_role() {
        let state = signed_in_state("accounts@guardpost.local", "accounts123").await;
        let response = dashboard_view_handler(State(state), Uri::from_static("/profile")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_permission_redirects_to_unauthorized() {
        let state = signed_in_state("staff@guardpost.local", "staff123").await;
        let response = dashboard_view_handler(State(state), Uri::from_static("/payroll")).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/unauthorized"));
    }

    #[tokio::test]
    async fn granted_view_reports_action_flags() {
        let state = signed_in_state("manager@guardpost.local", "manager123").await;
        let response = dashboard_view_handler(State(state), Uri::from_static("/guards")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["view"], "/guards");
        assert_eq!(body["actions"]["can_create"], true);
        assert_eq!(body["actions"]["can_delete"], false);
    }
}
