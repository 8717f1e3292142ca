//! IP-based rate limiting for the login endpoint.

use chrono::{DateTime, Duration, Utc};
use std::{collections::HashMap, net::IpAddr};
use tokio::sync::RwLock;

/// Failed-attempt record for a single client address
#[derive(Debug, Clone, Copy)]
struct AttemptRecord {
    count: u32,
    last_failure: DateTime<Utc>,
}

/// Outcome of a pre-login rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginGate {
    /// Attempt may proceed
    Allowed,

    /// Address is locked out; `minutes_remaining` is rounded up so the
    /// client is never told zero minutes while still locked.
    Locked { minutes_remaining: i64 },
}

impl LoginGate {
    /// Check if the attempt is allowed
    pub fn is_allowed(&self) -> bool {
        matches!(self, LoginGate::Allowed)
    }
}

/// Tracks failed login attempts per client IP and locks an address out
/// after too many consecutive failures.
///
/// Only failures count toward the limit; a successful login clears the
/// address. The lockout window restarts from the most recent failure.
pub struct LoginRateLimiter {
    attempts: RwLock<HashMap<IpAddr, AttemptRecord>>,
    max_attempts: u32,
    lockout: Duration,
}

impl LoginRateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    ///
    /// * `max_attempts` - Failures before the address locks
    /// * `lockout` - How long the address stays locked after the last failure
    pub fn new(max_attempts: u32, lockout: std::time::Duration) -> Self {
        Self {
            attempts: RwLock::new(HashMap::new()),
            max_attempts,
            lockout: Duration::from_std(lockout).unwrap_or_else(|_| Duration::minutes(15)),
        }
    }

    /// Atomically check whether a login attempt from `ip` may proceed.
    ///
    /// A locked entry whose window has elapsed is removed, so stale
    /// failures never count against a later attempt.
    pub async fn check(&self, ip: IpAddr) -> LoginGate {
        let mut attempts = self.attempts.write().await;
        let Some(record) = attempts.get(&ip) else {
            return LoginGate::Allowed;
        };

        if record.count < self.max_attempts {
            return LoginGate::Allowed;
        }

        let elapsed = Utc::now() - record.last_failure;
        if elapsed >= self.lockout {
            attempts.remove(&ip);
            return LoginGate::Allowed;
        }

        let remaining_ms = (self.lockout - elapsed).num_milliseconds();
        LoginGate::Locked {
            minutes_remaining: (remaining_ms + 59_999) / 60_000,
        }
    }

    /// Record a failed login attempt from `ip`
    pub async fn record_failure(&self, ip: IpAddr) {
        let mut attempts = self.attempts.write().await;
        let record = attempts.entry(ip).or_insert(AttemptRecord {
            count: 0,
            last_failure: Utc::now(),
        });
        record.count += 1;
        record.last_failure = Utc::now();
    }

    /// Clear the record for `ip` after a successful login
    pub async fn clear(&self, ip: IpAddr) {
        self.attempts.write().await.remove(&ip);
    }

    /// Remove entries whose lockout window has elapsed, returning how
    /// many were evicted. Run periodically so the map stays bounded by
    /// recently-active addresses.
    pub async fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let mut attempts = self.attempts.write().await;
        let before = attempts.len();
        attempts.retain(|_, record| now - record.last_failure < self.lockout);
        before - attempts.len()
    }
}

impl Default for LoginRateLimiter {
    /// Five attempts, fifteen-minute lockout.
    fn default() -> Self {
        Self::new(5, std::time::Duration::from_secs(15 * 60))
    }
}
