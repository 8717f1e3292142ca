//! User notifications: creation, listing, and read tracking.

pub mod manager;

pub use manager::NotificationManager;
