//! Application lifecycle manager.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::errors::{ApplicationError, ApplicationResult};
use crate::notify::NotificationManager;
use crate::store::{
    Application, ApplicationStatus, NewApplication, NewNotification, NotificationKind, Storage,
    UserId,
};

/// Payload for submitting a new application
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplication {
    pub service_id: i64,
    pub office_id: i64,
    pub invoice_number: String,
    #[serde(default)]
    pub is_emergency: bool,
}

/// An application joined with its service and office names for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    #[serde(flatten)]
    pub application: Application,
    pub service_name: String,
    pub office_name: String,
}

/// Application lifecycle manager
///
/// Applications are created `pending`; `approved` and `rejected` are
/// terminal. Submission emits a notification to the applicant.
#[derive(Clone)]
pub struct ApplicationManager {
    store: Arc<dyn Storage>,
    notifier: NotificationManager,
}

impl ApplicationManager {
    /// Create a new application manager
    pub fn new(store: Arc<dyn Storage>, notifier: NotificationManager) -> Self {
        Self { store, notifier }
    }

    /// Submit a new application for a user
    ///
    /// # Errors
    ///
    /// * `ApplicationError::InvalidInvoiceNumber` - Invoice number is not 10 digits
    /// * `ApplicationError::UnknownService` - Service id does not exist
    /// * `ApplicationError::UnknownOffice` - Office id does not exist
    pub async fn submit(
        &self,
        user_id: UserId,
        request: SubmitApplication,
    ) -> ApplicationResult<Application> {
        self.validate_invoice_number(&request.invoice_number)?;

        let service = self
            .store
            .service_by_id(request.service_id)
            .await?
            .ok_or(ApplicationError::UnknownService)?;
        self.store
            .office_by_id(request.office_id)
            .await?
            .ok_or(ApplicationError::UnknownOffice)?;

        let application = self
            .store
            .create_application(NewApplication {
                user_id,
                service_id: service.id,
                office_id: request.office_id,
                invoice_number: request.invoice_number,
                is_emergency: request.is_emergency || service.is_emergency,
            })
            .await?;

        self.notifier
            .notify(NewNotification {
                user_id,
                title: format!("Application Submitted: {}", service.name),
                message: format!(
                    "Your application for {} has been submitted and is pending review.",
                    service.name
                ),
                kind: NotificationKind::Info,
            })
            .await?;

        Ok(application)
    }

    /// Move an application to a new status
    ///
    /// `rejection_reason` is only applied when the new status is
    /// `Rejected`; it is ignored otherwise.
    pub async fn set_status(
        &self,
        id: i64,
        status: ApplicationStatus,
        rejection_reason: Option<String>,
    ) -> ApplicationResult<Application> {
        let reason = match status {
            ApplicationStatus::Rejected => rejection_reason,
            _ => None,
        };

        self.store
            .update_application_status(id, status, reason)
            .await?
            .ok_or(ApplicationError::NotFound)
    }

    /// List a user's applications with service and office names joined
    pub async fn list_for_user(&self, user_id: UserId) -> ApplicationResult<Vec<ApplicationSummary>> {
        let applications = self.store.applications_for_user(user_id).await?;

        let mut summaries = Vec::with_capacity(applications.len());
        for application in applications {
            let service_name = self
                .store
                .service_by_id(application.service_id)
                .await?
                .map(|service| service.name)
                .unwrap_or_else(|| "Unknown Service".to_string());
            let office_name = self
                .store
                .office_by_id(application.office_id)
                .await?
                .map(|office| office.name)
                .unwrap_or_else(|| "Unknown Office".to_string());

            summaries.push(ApplicationSummary {
                application,
                service_name,
                office_name,
            });
        }

        Ok(summaries)
    }

    /// Validate invoice number format: exactly ten digits
    fn validate_invoice_number(&self, invoice_number: &str) -> ApplicationResult<()> {
        let bytes = invoice_number.as_bytes();
        if bytes.len() != 10 || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(ApplicationError::InvalidInvoiceNumber(
                "Invoice number must be exactly 10 digits".to_string(),
            ));
        }

        Ok(())
    }
}
