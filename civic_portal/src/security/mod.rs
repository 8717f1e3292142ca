//! Security module providing login rate limiting.
//!
//! Failed logins are tracked per client IP: after five consecutive
//! failures an address is locked out for fifteen minutes, counted from
//! the most recent failure. A successful login clears the address
//! immediately. Entries for idle addresses are swept periodically so the
//! tracking map stays bounded.
//!
//! ## Example
//!
//! ```
//! use civic_portal::security::{LoginGate, LoginRateLimiter};
//! use std::net::IpAddr;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let limiter = LoginRateLimiter::default();
//! let ip: IpAddr = "192.168.1.1".parse().unwrap();
//!
//! match limiter.check(ip).await {
//!     LoginGate::Allowed => {
//!         // try the credentials, then record_failure or clear
//!     }
//!     LoginGate::Locked { minutes_remaining } => {
//!         println!("Locked for {minutes_remaining} more minutes");
//!     }
//! }
//! # }
//! ```

pub mod rate_limiter;

pub use rate_limiter::{LoginGate, LoginRateLimiter};
