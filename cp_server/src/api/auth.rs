//! Authentication API handlers.
//!
//! Registration and login for citizen accounts. Both endpoints return a
//! session token plus the user's profile. Login is rate limited per
//! client IP: five failures lock the address for fifteen minutes.
//!
//! # Examples
//!
//! Register:
//! ```bash
//! curl -X POST http://localhost:5000/api/auth/register \
//!   -H "Content-Type: application/json" \
//!   -d '{"nationalNumber": "AB1234567890", "password": "secret1", "fullName": "Jane Doe"}'
//! ```
//!
//! Login:
//! ```bash
//! curl -X POST http://localhost:5000/api/auth/login \
//!   -H "Content-Type: application/json" \
//!   -d '{"nationalNumber": "AB1234567890", "password": "secret1"}'
//! ```

use axum::{Json, extract::State, http::StatusCode};
use civic_portal::auth::{AuthError, LoginRequest, RegisterRequest, UserProfile};
use civic_portal::security::LoginGate;
use serde::Serialize;

use super::middleware::ClientAddr;
use super::{AppState, ErrorResponse, error};
use crate::logging::log_security_event;

/// Session token plus profile, returned by both register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Register a new citizen account and issue a session token.
///
/// # Response
///
/// `201 Created` with `{"token": "...", "user": {...}}`.
///
/// # Errors
///
/// - `400 Bad Request`: Invalid national number format or weak password
/// - `409 Conflict`: National number already registered
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, Json<ErrorResponse>)> {
    match state.auth_manager.register(payload).await {
        Ok((user, token)) => Ok((
            StatusCode::CREATED,
            Json(AuthResponse {
                token,
                user: UserProfile::from(&user),
            }),
        )),
        Err(e) => {
            let status = match &e {
                AuthError::NationalNumberTaken => StatusCode::CONFLICT,
                AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            };
            Err(error(status, e.client_message()))
        }
    }
}

/// Authenticate a citizen and issue a session token.
///
/// # Response
///
/// `200 OK` with `{"token": "...", "user": {...}}`.
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown national number or wrong password
///   (indistinguishable by design)
/// - `429 Too Many Requests`: Client address locked after repeated failures
///
/// # Security
///
/// - Failures count against the client IP; the fifth locks the address
///   for fifteen minutes from the most recent failure
/// - A successful login clears the address immediately
pub async fn login(
    State(state): State<AppState>,
    ClientAddr(ip): ClientAddr,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let LoginGate::Locked { minutes_remaining } = state.login_limiter.check(ip).await {
        log_security_event(
            "login_lockout",
            None,
            Some(&ip.to_string()),
            "Login attempt from locked address",
        );
        return Err(error(
            StatusCode::TOO_MANY_REQUESTS,
            format!(
                "Too many failed login attempts. Account locked for {minutes_remaining} more minutes"
            ),
        ));
    }

    match state.auth_manager.login(payload).await {
        Ok((user, token)) => {
            state.login_limiter.clear(ip).await;
            Ok(Json(AuthResponse {
                token,
                user: UserProfile::from(&user),
            }))
        }
        Err(e) => {
            let status = match &e {
                AuthError::InvalidCredentials => {
                    state.login_limiter.record_failure(ip).await;
                    log_security_event(
                        "failed_login",
                        None,
                        Some(&ip.to_string()),
                        "Invalid credentials",
                    );
                    StatusCode::UNAUTHORIZED
                }
                AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            };
            Err(error(status, e.client_message()))
        }
    }
}
