//! Service application handlers.

use axum::{Extension, Json, extract::State, http::StatusCode};
use civic_portal::applications::{ApplicationError, ApplicationSummary, SubmitApplication};
use civic_portal::store::Application;

use super::middleware::AuthUser;
use super::{AppState, ErrorResponse, error};

/// List the authenticated user's applications with service and office
/// names joined for display.
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<ApplicationSummary>>, (StatusCode, Json<ErrorResponse>)> {
    match state.application_manager.list_for_user(auth.id).await {
        Ok(summaries) => Ok(Json(summaries)),
        Err(e) => Err(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.client_message(),
        )),
    }
}

/// Submit a new service application.
///
/// # Request Body
///
/// ```json
/// {"serviceId": 1, "officeId": 1, "invoiceNumber": "1234567890"}
/// ```
///
/// # Response
///
/// `201 Created` with the pending application. A notification is
/// delivered to the applicant as part of the submission.
///
/// # Errors
///
/// - `400 Bad Request`: Invoice number not 10 digits, or unknown
///   service/office id
pub async fn submit_application(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<SubmitApplication>,
) -> Result<(StatusCode, Json<Application>), (StatusCode, Json<ErrorResponse>)> {
    match state.application_manager.submit(auth.id, payload).await {
        Ok(application) => Ok((StatusCode::CREATED, Json(application))),
        Err(e) => {
            let status = match &e {
                ApplicationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                ApplicationError::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_REQUEST,
            };
            Err(error(status, e.client_message()))
        }
    }
}
