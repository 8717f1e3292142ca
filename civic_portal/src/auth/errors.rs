//! Authentication error types.

use thiserror::Error;

use crate::store::StoreError;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// Credential check failed; deliberately does not say whether the
    /// account exists.
    #[error("Invalid National Number or password")]
    InvalidCredentials,

    /// National number already registered
    #[error("User with this National Number already exists")]
    NationalNumberTaken,

    /// Invalid national number format
    #[error("Invalid national number: {0}")]
    InvalidNationalNumber(String),

    /// Password too weak
    #[error("Password too weak: {0}")]
    WeakPassword(String),

    /// JWT token error
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Storage and JWT errors are sanitized to prevent disclosure of
    /// internal system structure.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Store(_) => "Internal server error".to_string(),
            AuthError::Jwt(_) => "Invalid or expired token".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
