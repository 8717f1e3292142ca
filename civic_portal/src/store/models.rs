//! Domain records persisted by the [`Storage`](super::Storage) backend.
//!
//! All records serialize as camelCase JSON, matching the portal's public API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User ID type
pub type UserId = i64;

/// A registered citizen account.
///
/// The password hash is never serialized; API responses use
/// [`UserProfile`](crate::auth::UserProfile) instead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub national_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub profile_complete: bool,
    pub dark_mode: bool,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a new user; the store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub national_number: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// Explicit settings patch: exactly the mutable user fields.
///
/// Unset fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettingsPatch {
    pub dark_mode: Option<bool>,
    pub language: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// An issued identity document (passport, ID card, birth certificate, ...).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: String,
    pub document_number: String,
    pub issued_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub status: String,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a new document.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub user_id: UserId,
    pub kind: String,
    pub document_number: String,
    pub issued_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub status: String,
    pub additional_info: Option<String>,
}

/// A government service citizens can apply for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_emergency: bool,
    pub active: bool,
}

/// Fields required to insert a new service.
#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub is_emergency: bool,
}

/// An office location where applications are processed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Office {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub active: bool,
}

/// Fields required to insert a new office.
#[derive(Debug, Clone)]
pub struct NewOffice {
    pub name: String,
    pub location: String,
}

/// Lifecycle state of a service application.
///
/// `Approved` and `Rejected` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

/// A submitted service application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub user_id: UserId,
    pub service_id: i64,
    pub office_id: i64,
    pub invoice_number: String,
    pub is_emergency: bool,
    pub status: ApplicationStatus,
    pub rejection_reason: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a new application; created `pending` with
/// `applied_at = updated_at = now`.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user_id: UserId,
    pub service_id: i64,
    pub office_id: i64,
    pub invoice_number: String,
    pub is_emergency: bool,
}

/// Severity/category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A notification delivered to a user, unread by default.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a new notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}
