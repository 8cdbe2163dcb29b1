use axum::Router;
use axum::routing::{get, patch, post};
use guardpost_core::AppError;
use guardpost_domain::DashboardView;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(frontend_url)?;

    let auth_routes = Router::new()
        .route("/api/auth/login", post(handlers::auth::login_handler))
        .route("/api/auth/logout", post(handlers::auth::logout_handler))
        .route("/api/auth/me", get(handlers::auth::me_handler))
        .route("/api/auth/profile", patch(handlers::auth::update_profile_handler))
        .route(
            "/api/auth/permissions/{permission}",
            get(handlers::auth::permission_check_handler),
        )
        .route(
            "/api/notifications",
            get(handlers::notifications::drain_notifications_handler),
        );

    let view_routes = DashboardView::all()
        .iter()
        .fold(Router::new(), |router, view| {
            router.route(view.path(), get(handlers::views::dashboard_view_handler))
        });

    let destinations = app_state.route_guard.destinations().clone();
    let page_routes = Router::new()
        .route(
            destinations.login_path.as_str(),
            get(handlers::pages::login_page_handler),
        )
        .route(
            destinations.unauthorized_path.as_str(),
            get(handlers::pages::unauthorized_page_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(auth_routes)
        .merge(view_routes)
        .merge(page_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
