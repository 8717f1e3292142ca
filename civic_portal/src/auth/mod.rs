//! Authentication module providing citizen registration, login, and session
//! tokens.
//!
//! This module implements secure authentication with:
//! - Argon2id password hashing with server-side pepper
//! - JWT session tokens (24-hour expiry)
//! - National number format validation
//! - Credential errors that do not reveal whether an account exists
//!
//! ## Example
//!
//! ```
//! use civic_portal::auth::{AuthManager, RegisterRequest};
//! use civic_portal::store::MemStorage;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = AuthManager::new(
//!     Arc::new(MemStorage::new()),
//!     "secret_pepper".to_string(),
//!     "jwt_secret".to_string(),
//! );
//!
//! let request = RegisterRequest {
//!     national_number: "AB1234567890".to_string(),
//!     password: "secret123".to_string(),
//!     full_name: "Amina Hassan".to_string(),
//!     phone_number: None,
//!     email: None,
//! };
//!
//! let (user, token) = auth.register(request).await?;
//! assert_eq!(auth.verify_access_token(&token)?.sub, user.id);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{AuthError, AuthResult};
pub use manager::AuthManager;
pub use models::{AccessTokenClaims, LoginRequest, RegisterRequest, UserProfile};
