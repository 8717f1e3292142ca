//! Identity document handlers.

use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use civic_portal::store::{Document, NewDocument};
use serde::Deserialize;

use super::middleware::AuthUser;
use super::{AppState, ErrorResponse, error};

/// Payload for adding a document to the authenticated user's record
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub document_number: String,
    pub issued_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    #[serde(default = "default_status")]
    pub status: String,
    pub additional_info: Option<String>,
}

fn default_status() -> String {
    "active".to_string()
}

/// List the authenticated user's documents, oldest first.
pub async fn list_documents(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<Document>>, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.documents_for_user(auth.id).await {
        Ok(documents) => Ok(Json(documents)),
        Err(_) => Err(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
        )),
    }
}

/// Add a document to the authenticated user's record.
///
/// # Errors
///
/// - `400 Bad Request`: Empty document type or number
pub async fn create_document(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateDocumentPayload>,
) -> Result<(StatusCode, Json<Document>), (StatusCode, Json<ErrorResponse>)> {
    if payload.kind.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Document type is required"));
    }
    if payload.document_number.trim().is_empty() {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "Document number is required",
        ));
    }

    let document = NewDocument {
        user_id: auth.id,
        kind: payload.kind,
        document_number: payload.document_number,
        issued_date: payload.issued_date,
        expiry_date: payload.expiry_date,
        status: payload.status,
        additional_info: payload.additional_info,
    };

    match state.storage.create_document(document).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(_) => Err(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
        )),
    }
}
