//! Notification handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use civic_portal::store::Notification;

use super::middleware::AuthUser;
use super::{AppState, ErrorResponse, error};

/// List the authenticated user's notifications, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<Notification>>, (StatusCode, Json<ErrorResponse>)> {
    match state.notification_manager.list_for_user(auth.id).await {
        Ok(notifications) => Ok(Json(notifications)),
        Err(_) => Err(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
        )),
    }
}

/// Mark one of the authenticated user's notifications as read.
/// Repeating the call is harmless.
///
/// # Errors
///
/// - `404 Not Found`: No such notification, or it belongs to another user
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Notification>, (StatusCode, Json<ErrorResponse>)> {
    match state.notification_manager.mark_read(auth.id, id).await {
        Ok(Some(notification)) => Ok(Json(notification)),
        Ok(None) => Err(error(StatusCode::NOT_FOUND, "Notification not found")),
        Err(_) => Err(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
        )),
    }
}
