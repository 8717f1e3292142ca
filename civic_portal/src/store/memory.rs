//! In-memory storage backend.
//!
//! Tables are plain maps behind a single `tokio::sync::RwLock`; ids are
//! per-table serial counters starting at 1. State is process-local and lost
//! on restart, which is acceptable for the current single-node deployment.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::models::{
    Application, ApplicationStatus, Document, NewApplication, NewDocument, NewNotification,
    NewOffice, NewService, NewUser, Notification, Office, Service, User, UserId,
    UserSettingsPatch,
};
use super::Storage;
use async_trait::async_trait;

#[derive(Default)]
struct Tables {
    users: HashMap<i64, User>,
    documents: HashMap<i64, Document>,
    services: HashMap<i64, Service>,
    offices: HashMap<i64, Office>,
    applications: HashMap<i64, Application>,
    notifications: HashMap<i64, Notification>,
    next_user_id: i64,
    next_document_id: i64,
    next_service_id: i64,
    next_office_id: i64,
    next_application_id: i64,
    next_notification_id: i64,
}

impl Tables {
    fn new() -> Self {
        Self {
            next_user_id: 1,
            next_document_id: 1,
            next_service_id: 1,
            next_office_id: 1,
            next_application_id: 1,
            next_notification_id: 1,
            ..Self::default()
        }
    }

    fn insert_service(&mut self, service: NewService) -> Service {
        let id = self.next_service_id;
        self.next_service_id += 1;
        let record = Service {
            id,
            name: service.name,
            description: service.description,
            is_emergency: service.is_emergency,
            active: true,
        };
        self.services.insert(id, record.clone());
        record
    }

    fn insert_office(&mut self, office: NewOffice) -> Office {
        let id = self.next_office_id;
        self.next_office_id += 1;
        let record = Office {
            id,
            name: office.name,
            location: office.location,
            active: true,
        };
        self.offices.insert(id, record.clone());
        record
    }
}

/// In-memory [`Storage`] implementation, seeded with the service and office
/// catalogue on construction.
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl MemStorage {
    /// Create a new store with the standard catalogue seeded.
    pub fn new() -> Self {
        let mut tables = Tables::new();
        seed_services(&mut tables);
        seed_offices(&mut tables);
        Self {
            tables: RwLock::new(tables),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_services(tables: &mut Tables) {
    let services = [
        ("New Passport Application", "Apply for a new passport", false),
        ("Passport Renewal", "Renew your existing passport", false),
        ("New ID Card Application", "Apply for a new ID card", false),
        ("ID Card Renewal", "Renew your existing ID card", false),
        ("Birth Certificate", "Request a birth certificate", false),
        (
            "Emergency Travel Document",
            "Apply for emergency travel documents",
            true,
        ),
    ];

    for (name, description, is_emergency) in services {
        tables.insert_service(NewService {
            name: name.to_string(),
            description: Some(description.to_string()),
            is_emergency,
        });
    }
}

fn seed_offices(tables: &mut Tables) {
    let offices = [
        ("Khartoum State Office", "Khartoum"),
        ("Gezira State Office", "Gezira"),
        ("Kassala State Office", "Kassala"),
        ("Darfur State Office", "Darfur"),
        ("River Nile State Office", "River Nile"),
        ("Red Sea State Office", "Red Sea"),
    ];

    for (name, location) in offices {
        tables.insert_office(NewOffice {
            name: name.to_string(),
            location: location.to_string(),
        });
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        // Uniqueness is checked under the same write lock as the insert,
        // so concurrent registrations cannot both slip past it.
        if tables
            .users
            .values()
            .any(|existing| existing.national_number.eq_ignore_ascii_case(&user.national_number))
        {
            return Err(StoreError::Conflict(
                "national number already registered".to_string(),
            ));
        }
        let id = tables.next_user_id;
        tables.next_user_id += 1;
        let record = User {
            id,
            national_number: user.national_number,
            password_hash: user.password_hash,
            full_name: user.full_name,
            phone_number: user.phone_number,
            email: user.email,
            profile_complete: false,
            dark_mode: false,
            language: "en".to_string(),
            created_at: Utc::now(),
        };
        tables.users.insert(id, record.clone());
        Ok(record)
    }

    async fn user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_national_number(&self, national_number: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.national_number.eq_ignore_ascii_case(national_number))
            .cloned())
    }

    async fn update_user(&self, id: UserId, patch: UserSettingsPatch) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(dark_mode) = patch.dark_mode {
            user.dark_mode = dark_mode;
        }
        if let Some(language) = patch.language {
            user.language = language;
        }
        if let Some(phone_number) = patch.phone_number {
            user.phone_number = Some(phone_number);
        }
        if let Some(email) = patch.email {
            user.email = Some(email);
        }
        Ok(Some(user.clone()))
    }

    async fn documents_for_user(&self, user_id: UserId) -> StoreResult<Vec<Document>> {
        let tables = self.tables.read().await;
        let mut documents: Vec<Document> = tables
            .documents
            .values()
            .filter(|doc| doc.user_id == user_id)
            .cloned()
            .collect();
        documents.sort_by_key(|doc| doc.id);
        Ok(documents)
    }

    async fn create_document(&self, document: NewDocument) -> StoreResult<Document> {
        let mut tables = self.tables.write().await;
        let id = tables.next_document_id;
        tables.next_document_id += 1;
        let record = Document {
            id,
            user_id: document.user_id,
            kind: document.kind,
            document_number: document.document_number,
            issued_date: document.issued_date,
            expiry_date: document.expiry_date,
            status: document.status,
            additional_info: document.additional_info,
            created_at: Utc::now(),
        };
        tables.documents.insert(id, record.clone());
        Ok(record)
    }

    async fn services(&self) -> StoreResult<Vec<Service>> {
        let tables = self.tables.read().await;
        let mut services: Vec<Service> = tables.services.values().cloned().collect();
        services.sort_by_key(|service| service.id);
        Ok(services)
    }

    async fn service_by_id(&self, id: i64) -> StoreResult<Option<Service>> {
        Ok(self.tables.read().await.services.get(&id).cloned())
    }

    async fn create_service(&self, service: NewService) -> StoreResult<Service> {
        Ok(self.tables.write().await.insert_service(service))
    }

    async fn offices(&self) -> StoreResult<Vec<Office>> {
        let tables = self.tables.read().await;
        let mut offices: Vec<Office> = tables.offices.values().cloned().collect();
        offices.sort_by_key(|office| office.id);
        Ok(offices)
    }

    async fn office_by_id(&self, id: i64) -> StoreResult<Option<Office>> {
        Ok(self.tables.read().await.offices.get(&id).cloned())
    }

    async fn create_office(&self, office: NewOffice) -> StoreResult<Office> {
        Ok(self.tables.write().await.insert_office(office))
    }

    async fn applications_for_user(&self, user_id: UserId) -> StoreResult<Vec<Application>> {
        let tables = self.tables.read().await;
        let mut applications: Vec<Application> = tables
            .applications
            .values()
            .filter(|app| app.user_id == user_id)
            .cloned()
            .collect();
        applications.sort_by_key(|app| app.id);
        Ok(applications)
    }

    async fn application_by_id(&self, id: i64) -> StoreResult<Option<Application>> {
        Ok(self.tables.read().await.applications.get(&id).cloned())
    }

    async fn create_application(&self, application: NewApplication) -> StoreResult<Application> {
        let mut tables = self.tables.write().await;
        let id = tables.next_application_id;
        tables.next_application_id += 1;
        let now = Utc::now();
        let record = Application {
            id,
            user_id: application.user_id,
            service_id: application.service_id,
            office_id: application.office_id,
            invoice_number: application.invoice_number,
            is_emergency: application.is_emergency,
            status: ApplicationStatus::Pending,
            rejection_reason: None,
            applied_at: now,
            updated_at: now,
        };
        tables.applications.insert(id, record.clone());
        Ok(record)
    }

    async fn update_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
        rejection_reason: Option<String>,
    ) -> StoreResult<Option<Application>> {
        let mut tables = self.tables.write().await;
        let Some(application) = tables.applications.get_mut(&id) else {
            return Ok(None);
        };
        application.status = status;
        if rejection_reason.is_some() {
            application.rejection_reason = rejection_reason;
        }
        application.updated_at = Utc::now();
        Ok(Some(application.clone()))
    }

    async fn notifications_for_user(&self, user_id: UserId) -> StoreResult<Vec<Notification>> {
        let tables = self.tables.read().await;
        let mut notifications: Vec<Notification> = tables
            .notifications
            .values()
            .filter(|notification| notification.user_id == user_id)
            .cloned()
            .collect();
        // Newest first; id breaks ties between same-instant inserts.
        notifications.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(notifications)
    }

    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> StoreResult<Notification> {
        let mut tables = self.tables.write().await;
        let id = tables.next_notification_id;
        tables.next_notification_id += 1;
        let record = Notification {
            id,
            user_id: notification.user_id,
            title: notification.title,
            message: notification.message,
            kind: notification.kind,
            read: false,
            created_at: Utc::now(),
        };
        tables.notifications.insert(id, record.clone());
        Ok(record)
    }

    async fn mark_notification_read(
        &self,
        user_id: UserId,
        id: i64,
    ) -> StoreResult<Option<Notification>> {
        let mut tables = self.tables.write().await;
        let Some(notification) = tables.notifications.get_mut(&id) else {
            return Ok(None);
        };
        // Another user's notification is indistinguishable from a
        // missing one.
        if notification.user_id != user_id {
            return Ok(None);
        }
        notification.read = true;
        Ok(Some(notification.clone()))
    }
}
