//! User profile and settings handlers.

use axum::{Extension, Json, extract::State, http::StatusCode};
use civic_portal::auth::UserProfile;
use civic_portal::store::UserSettingsPatch;

use super::middleware::AuthUser;
use super::{AppState, ErrorResponse, error};

/// Return the authenticated user's profile.
///
/// # Errors
///
/// - `404 Not Found`: Token references a user that no longer exists
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserProfile>, (StatusCode, Json<ErrorResponse>)> {
    match state.auth_manager.get_user(auth.id).await {
        Ok(Some(user)) => Ok(Json(UserProfile::from(&user))),
        Ok(None) => Err(error(StatusCode::NOT_FOUND, "User not found")),
        Err(e) => Err(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.client_message(),
        )),
    }
}

/// Update the authenticated user's settings.
///
/// Accepts a partial body; only the fields present are changed:
/// ```json
/// {"darkMode": true, "language": "ar"}
/// ```
pub async fn update_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(patch): Json<UserSettingsPatch>,
) -> Result<Json<UserProfile>, (StatusCode, Json<ErrorResponse>)> {
    match state.auth_manager.update_settings(auth.id, patch).await {
        Ok(Some(user)) => Ok(Json(UserProfile::from(&user))),
        Ok(None) => Err(error(StatusCode::NOT_FOUND, "User not found")),
        Err(e) => Err(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.client_message(),
        )),
    }
}
