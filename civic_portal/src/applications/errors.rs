//! Application lifecycle error types.

use thiserror::Error;

use crate::store::StoreError;

/// Application errors
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Referenced service does not exist
    #[error("Invalid service")]
    UnknownService,

    /// Referenced office does not exist
    #[error("Invalid office")]
    UnknownOffice,

    /// Invoice number format invalid
    #[error("Invalid invoice number: {0}")]
    InvalidInvoiceNumber(String),

    /// Application not found
    #[error("Application not found")]
    NotFound,
}

impl ApplicationError {
    /// Get a client-safe error message
    pub fn client_message(&self) -> String {
        match self {
            ApplicationError::Store(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for application operations
pub type ApplicationResult<T> = Result<T, ApplicationError>;
