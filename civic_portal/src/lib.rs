//! # Civic Portal
//!
//! Core library for a citizen services portal: account registration and
//! login keyed by national number, a catalogue of government services and
//! processing offices, service applications with a reviewed lifecycle,
//! and user notifications.
//!
//! ## Core Modules
//!
//! - [`auth`]: Registration, login, and JWT session tokens
//! - [`security`]: IP-based login rate limiting
//! - [`store`]: Storage trait and the in-memory backend
//! - [`applications`]: Application submission and review lifecycle
//! - [`notify`]: User notifications
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
//! assert_eq!(storage.services().await?.len(), 6);
//! # Ok(())
//! # }
//! ```

/// Registration, login, and session tokens.
pub mod auth;
pub use auth::{AuthManager, LoginRequest, RegisterRequest, UserProfile};

/// Login rate limiting.
pub mod security;
pub use security::{LoginGate, LoginRateLimiter};

/// Storage trait and backends.
pub mod store;
pub use store::{MemStorage, Storage};

/// Application lifecycle.
pub mod applications;
pub use applications::{ApplicationManager, ApplicationSummary, SubmitApplication};

/// User notifications.
pub mod notify;
pub use notify::NotificationManager;
