use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guardpost_application::{AuthFailure, LoginCredentials, LoginResult};
use guardpost_core::AppError;
use guardpost_domain::{Permission, ProfilePatch, Session, UserProfile};
use tracing::warn;

use crate::dto::{PermissionCheckResponse, SessionUserResponse, ViewLinkResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn login_handler(
    State(state): State<AppState>,
    Json(credentials): Json<LoginCredentials>,
) -> Response {
    let result = state.auth_session_service.login(credentials).await;

    let status = match &result {
        LoginResult::Authenticated { .. } => StatusCode::OK,
        LoginResult::Rejected {
            failure: AuthFailure::InvalidCredentials,
            ..
        } => StatusCode::UNAUTHORIZED,
        LoginResult::Rejected { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(result)).into_response()
}

pub async fn logout_handler(State(state): State<AppState>) -> StatusCode {
    if let Err(error) = state.auth_session_service.logout().await {
        warn!(error = %error, "signed out but the session store was not cleared");
    }

    StatusCode::NO_CONTENT
}

fn active_session(state: &AppState) -> ApiResult<Session> {
    let session_state = state.auth_session_service.state();
    if session_state.is_loading() {
        return Err(ApiError::SessionLoading);
    }

    session_state
        .session()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()).into())
}

pub async fn me_handler(State(state): State<AppState>) -> ApiResult<Json<SessionUserResponse>> {
    let session = active_session(&state)?;

    let views = state
        .auth_session_service
        .authorization_service()
        .accessible_views(session.role())
        .into_iter()
        .map(ViewLinkResponse::from)
        .collect();

    Ok(Json(SessionUserResponse {
        role_display_name: session.role().display_name(),
        permissions: session.permissions().iter().copied().collect(),
        views,
        user: session.user().clone(),
    }))
}

pub async fn permission_check_handler(
    State(state): State<AppState>,
    Path(permission): Path<String>,
) -> ApiResult<Json<PermissionCheckResponse>> {
    let permission: Permission = permission.parse()?;
    let session = active_session(&state)?;

    state
        .auth_session_service
        .authorization_service()
        .require_permission(session.role(), permission)?;

    Ok(Json(PermissionCheckResponse {
        permission,
        granted: true,
    }))
}

pub async fn update_profile_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProfilePatch>, JsonRejection>,
) -> ApiResult<Json<UserProfile>> {
    let Json(patch) = payload.map_err(|rejection| {
        AppError::Validation(format!("invalid profile update: {}", rejection.body_text()))
    })?;

    let user = state.auth_session_service.update_profile(patch).await?;
    Ok(Json(user))
}
