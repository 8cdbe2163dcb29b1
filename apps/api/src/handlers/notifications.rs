use axum::Json;
use axum::extract::State;
use guardpost_application::Notification;

use crate::state::AppState;

pub async fn drain_notifications_handler(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.notifications.drain())
}
