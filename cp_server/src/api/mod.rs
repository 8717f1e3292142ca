//! HTTP API for the citizen services portal.
//!
//! This module provides the REST API for the portal: citizen registration
//! and login, profile and settings management, the service/office
//! catalogue, application submission, and notifications.
//!
//! # Architecture
//!
//! The API is built with:
//! - **Axum**: Async web framework
//! - **Tower**: Middleware for CORS
//! - **JWT**: Bearer-token authentication with 24-hour session tokens
//!
//! # Modules
//!
//! - [`auth`]: Registration and login (rate limited per client IP)
//! - [`users`]: Profile and settings
//! - [`documents`]: A user's identity documents
//! - [`catalogue`]: Public service and office listings
//! - [`applications`]: Application submission and listing
//! - [`notifications`]: Notification listing and read tracking
//! - [`middleware`]: Bearer-token middleware and client IP extraction
//! - [`request_id`]: Request ID correlation
//!
//! # Endpoints Overview
//!
//! ## Public
//! - `GET  /health` - Server health status
//! - `POST /api/auth/register` - Register new citizen
//! - `POST /api/auth/login` - Login with national number and password
//! - `GET  /api/services` - List services
//! - `GET  /api/offices` - List offices
//!
//! ## Protected (bearer token required)
//! - `GET  /api/user` - Current user's profile
//! - `PUT  /api/user/settings` - Update settings
//! - `GET  /api/user/docs` - List the user's documents
//! - `POST /api/user/docs` - Add a document
//! - `GET  /api/applications` - List the user's applications
//! - `POST /api/services/apply` - Submit an application
//! - `GET  /api/notifications` - List notifications, newest first
//! - `PUT  /api/notifications/{id}/read` - Mark a notification read
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production, configure
//! appropriate origins, methods, and headers.

pub mod applications;
pub mod auth;
pub mod catalogue;
pub mod documents;
pub mod middleware;
pub mod notifications;
pub mod request_id;
pub mod users;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
};
use civic_portal::{
    applications::ApplicationManager, auth::AuthManager, notify::NotificationManager,
    security::LoginRateLimiter, store::Storage,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request (cheap due to Arc wrappers).
#[derive(Clone)]
pub struct AppState {
    pub auth_manager: Arc<AuthManager>,
    pub application_manager: Arc<ApplicationManager>,
    pub notification_manager: Arc<NotificationManager>,
    pub storage: Arc<dyn Storage>,
    pub login_limiter: Arc<LoginRateLimiter>,
}

/// Error body returned by every failing endpoint: `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Helper to build an error response pair
pub(crate) fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
        }),
    )
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Example
///
/// ```rust,no_run
/// # use cp_server::api::{create_router, AppState};
/// # async fn example(state: AppState) -> Result<(), Box<dyn std::error::Error>> {
/// let app = create_router(state);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/services", get(catalogue::list_services))
        .route("/offices", get(catalogue::list_offices));

    let protected_routes = Router::new()
        .route("/user", get(users::get_profile))
        .route("/user/settings", put(users::update_settings))
        .route(
            "/user/docs",
            get(documents::list_documents).post(documents::create_document),
        )
        .route("/applications", get(applications::list_applications))
        .route("/services/apply", post(applications::submit_application))
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/{id}/read",
            put(notifications::mark_notification_read),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", Router::new().merge(public_routes).merge(protected_routes))
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5000/health
/// # {"status":"healthy","version":"0.1.0","timestamp":"2026-08-26T10:30:00Z"}
/// ```
async fn health_check() -> impl IntoResponse {
    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}
