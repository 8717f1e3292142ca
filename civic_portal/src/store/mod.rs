//! Storage abstraction for the portal's persistent entities.
//!
//! The [`Storage`] trait is the single seam between the domain managers and
//! the data backend, enabling dependency injection and self-contained tests.
//! [`MemStorage`] is the process-local implementation backing the current
//! deployment; a database-backed implementation can slot in behind the same
//! trait without touching the managers.
//!
//! ## Example
//!
//! ```
//! use civic_portal::store::{MemStorage, Storage};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());
//! let services = storage.services().await?;
//! assert!(!services.is_empty());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

pub mod errors;
pub mod memory;
pub mod models;

pub use errors::{StoreError, StoreResult};
pub use memory::MemStorage;
pub use models::{
    Application, ApplicationStatus, Document, NewApplication, NewDocument, NewNotification,
    NewOffice, NewService, NewUser, Notification, NotificationKind, Office, Service, User, UserId,
    UserSettingsPatch,
};

/// Trait for portal storage operations
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a new user, assigning its id and creation timestamp.
    ///
    /// Fails with [`StoreError::Conflict`] if the national number is
    /// already registered (case-insensitive). The check and the insert
    /// happen atomically with respect to other calls.
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    /// Find a user by id.
    async fn user_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Find a user by national number; the comparison is case-insensitive.
    async fn user_by_national_number(&self, national_number: &str) -> StoreResult<Option<User>>;

    /// Apply a settings patch to a user; unset fields are left unchanged.
    /// Returns `None` if the user does not exist.
    async fn update_user(&self, id: UserId, patch: UserSettingsPatch) -> StoreResult<Option<User>>;

    /// List a user's documents, oldest first.
    async fn documents_for_user(&self, user_id: UserId) -> StoreResult<Vec<Document>>;

    /// Insert a new document.
    async fn create_document(&self, document: NewDocument) -> StoreResult<Document>;

    /// List all services.
    async fn services(&self) -> StoreResult<Vec<Service>>;

    /// Find a service by id.
    async fn service_by_id(&self, id: i64) -> StoreResult<Option<Service>>;

    /// Insert a new service.
    async fn create_service(&self, service: NewService) -> StoreResult<Service>;

    /// List all offices.
    async fn offices(&self) -> StoreResult<Vec<Office>>;

    /// Find an office by id.
    async fn office_by_id(&self, id: i64) -> StoreResult<Option<Office>>;

    /// Insert a new office.
    async fn create_office(&self, office: NewOffice) -> StoreResult<Office>;

    /// List a user's applications, oldest first.
    async fn applications_for_user(&self, user_id: UserId) -> StoreResult<Vec<Application>>;

    /// Find an application by id.
    async fn application_by_id(&self, id: i64) -> StoreResult<Option<Application>>;

    /// Insert a new application in the `pending` state.
    async fn create_application(&self, application: NewApplication) -> StoreResult<Application>;

    /// Update an application's status, refreshing `updated_at`.
    ///
    /// A `Some` rejection reason replaces the stored one; `None` keeps it.
    /// Returns `None` if the application does not exist.
    async fn update_application_status(
        &self,
        id: i64,
        status: models::ApplicationStatus,
        rejection_reason: Option<String>,
    ) -> StoreResult<Option<Application>>;

    /// List a user's notifications, newest first (ties broken by id).
    async fn notifications_for_user(&self, user_id: UserId) -> StoreResult<Vec<Notification>>;

    /// Insert a new unread notification.
    async fn create_notification(&self, notification: NewNotification)
    -> StoreResult<Notification>;

    /// Flip a notification's read flag to true (idempotent).
    /// Returns `None` if the notification does not exist or belongs to
    /// a different user.
    async fn mark_notification_read(
        &self,
        user_id: UserId,
        id: i64,
    ) -> StoreResult<Option<Notification>>;
}
