//! Public service and office catalogue handlers.

use axum::{Json, extract::State, http::StatusCode};
use civic_portal::store::{Office, Service};

use super::{AppState, ErrorResponse, error};

/// List all services citizens can apply for.
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<Service>>, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.services().await {
        Ok(services) => Ok(Json(services)),
        Err(_) => Err(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
        )),
    }
}

/// List all processing offices.
pub async fn list_offices(
    State(state): State<AppState>,
) -> Result<Json<Vec<Office>>, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.offices().await {
        Ok(offices) => Ok(Json(offices)),
        Err(_) => Err(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
        )),
    }
}
