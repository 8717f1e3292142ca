//! Integration tests for the HTTP API.
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot`;
//! every test runs against a fresh in-memory store.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use civic_portal::applications::ApplicationManager;
use civic_portal::auth::AuthManager;
use civic_portal::notify::NotificationManager;
use civic_portal::security::LoginRateLimiter;
use civic_portal::store::{MemStorage, Storage};
use cp_server::api::{AppState, create_router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt; // for `oneshot`

/// Build a test router with a fresh store and default rate limits
fn build_app() -> Router {
    let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());
    let auth_manager = Arc::new(AuthManager::new(
        Arc::clone(&storage),
        "test_pepper_for_testing_only".to_string(),
        "test_secret_key_for_testing_only".to_string(),
    ));
    let notification_manager = NotificationManager::new(Arc::clone(&storage));
    let application_manager = Arc::new(ApplicationManager::new(
        Arc::clone(&storage),
        notification_manager.clone(),
    ));
    let state = AppState {
        auth_manager,
        application_manager,
        notification_manager: Arc::new(notification_manager),
        storage,
        login_limiter: Arc::new(LoginRateLimiter::new(5, Duration::from_secs(900))),
    };
    create_router(state)
}

/// Generate a unique national number for tests
fn unique_national_number() -> String {
    let rand_id: u32 = rand::random();
    format!("AB{:010}", rand_id)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn bearer_request(method: &str, uri: &str, token: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"));
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user and return (national_number, token)
async fn register(app: &Router) -> (String, String) {
    let national_number = unique_national_number();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            &json!({
                "nationalNumber": national_number,
                "password": "secret1",
                "fullName": "Jane Doe"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    (national_number, token)
}

// ============================================================================
// Health Check
// ============================================================================

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = build_app();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_returns_token_and_profile() {
    let app = build_app();
    let national_number = unique_national_number();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            &json!({
                "nationalNumber": national_number,
                "password": "secret1",
                "fullName": "Jane Doe",
                "email": "jane@example.com"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["nationalNumber"], national_number);
    assert_eq!(body["user"]["fullName"], "Jane Doe");
    assert!(
        body["user"].get("passwordHash").is_none(),
        "Password hash must never appear on the wire"
    );
}

#[tokio::test]
async fn test_register_duplicate_is_conflict_even_with_different_case() {
    let app = build_app();
    let (national_number, _) = register(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            &json!({
                "nationalNumber": national_number.to_lowercase(),
                "password": "secret1",
                "fullName": "Jane Doe"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "User with this National Number already exists"
    );
}

#[tokio::test]
async fn test_register_rejects_bad_national_number_and_short_password() {
    let app = build_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            &json!({"nationalNumber": "1234567890AB", "password": "secret1", "fullName": "Jane Doe"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            &json!({"nationalNumber": unique_national_number(), "password": "short", "fullName": "Jane Doe"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let app = build_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from("{ invalid json }"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY,
        "Malformed JSON should return 400 or 422"
    );
}

// ============================================================================
// Login and Rate Limiting
// ============================================================================

#[tokio::test]
async fn test_login_round_trip() {
    let app = build_app();
    let (national_number, _) = register(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            &json!({"nationalNumber": national_number, "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["nationalNumber"], national_number);
}

#[tokio::test]
async fn test_login_bad_credentials_unauthorized() {
    let app = build_app();
    let (national_number, _) = register(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            &json!({"nationalNumber": national_number, "password": "wrong-password"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid National Number or password");
}

#[tokio::test]
async fn test_sixth_attempt_locked_with_minutes_remaining() {
    let app = build_app();
    let (national_number, _) = register(&app).await;

    for _ in 0..5 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                &json!({"nationalNumber": national_number, "password": "wrong-password"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Sixth attempt is rejected before credentials are checked, even with
    // the correct password.
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            &json!({"nationalNumber": national_number, "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Too many failed login attempts. Account locked for 15 more minutes"
    );
}

#[tokio::test]
async fn test_lockout_is_per_client_address() {
    let app = build_app();
    let (national_number, _) = register(&app).await;

    for _ in 0..5 {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header("content-type", "application/json")
            .header("x-forwarded-for", "203.0.113.50")
            .body(Body::from(
                json!({"nationalNumber": national_number, "password": "wrong-password"})
                    .to_string(),
            ))
            .unwrap();
        app.clone().oneshot(request).await.unwrap();
    }

    // The locked address is rejected.
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.50")
        .body(Body::from(
            json!({"nationalNumber": national_number, "password": "secret1"}).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different address logs in fine.
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.51")
        .body(Body::from(
            json!({"nationalNumber": national_number, "password": "secret1"}).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Bearer Authentication
// ============================================================================

#[tokio::test]
async fn test_missing_token_unauthorized() {
    let app = build_app();

    let request = Request::builder()
        .uri("/api/user")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Authentication required");
}

#[tokio::test]
async fn test_garbage_token_forbidden() {
    let app = build_app();

    let response = app
        .oneshot(bearer_request("GET", "/api/user", "not-a-jwt", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_profile_and_settings_update() {
    let app = build_app();
    let (national_number, token) = register(&app).await;

    let response = app
        .clone()
        .oneshot(bearer_request("GET", "/api/user", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert_eq!(profile["nationalNumber"], national_number);
    assert_eq!(profile["darkMode"], false);
    assert_eq!(profile["language"], "en");

    let response = app
        .oneshot(bearer_request(
            "PUT",
            "/api/user/settings",
            &token,
            Some(&json!({"darkMode": true, "language": "ar"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["darkMode"], true);
    assert_eq!(updated["language"], "ar");
    // Untouched fields survive the patch.
    assert_eq!(updated["nationalNumber"], national_number);
}

// ============================================================================
// Catalogue
// ============================================================================

#[tokio::test]
async fn test_services_and_offices_are_public_and_seeded() {
    let app = build_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/services")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let services = body_json(response).await;
    assert_eq!(services.as_array().unwrap().len(), 6);
    assert_eq!(services[0]["name"], "New Passport Application");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/offices")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let offices = body_json(response).await;
    assert_eq!(offices.as_array().unwrap().len(), 6);
    assert_eq!(offices[0]["name"], "Khartoum State Office");
}

// ============================================================================
// Documents
// ============================================================================

#[tokio::test]
async fn test_document_create_and_list() {
    let app = build_app();
    let (_, token) = register(&app).await;

    let response = app
        .clone()
        .oneshot(bearer_request(
            "POST",
            "/api/user/docs",
            &token,
            Some(&json!({
                "type": "Passport",
                "documentNumber": "P1234567",
                "issuedDate": "2020-01-15T00:00:00Z",
                "expiryDate": "2030-01-15T00:00:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["type"], "Passport");
    assert_eq!(created["status"], "active");

    let response = app
        .oneshot(bearer_request("GET", "/api/user/docs", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let documents = body_json(response).await;
    assert_eq!(documents.as_array().unwrap().len(), 1);
    assert_eq!(documents[0]["documentNumber"], "P1234567");
}

#[tokio::test]
async fn test_document_requires_type_and_number() {
    let app = build_app();
    let (_, token) = register(&app).await;

    let response = app
        .oneshot(bearer_request(
            "POST",
            "/api/user/docs",
            &token,
            Some(&json!({
                "type": "  ",
                "documentNumber": "P1234567",
                "issuedDate": "2020-01-15T00:00:00Z",
                "expiryDate": "2030-01-15T00:00:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Applications and Notifications
// ============================================================================

#[tokio::test]
async fn test_apply_creates_pending_application_and_notification() {
    let app = build_app();
    let (_, token) = register(&app).await;

    let response = app
        .clone()
        .oneshot(bearer_request(
            "POST",
            "/api/services/apply",
            &token,
            Some(&json!({
                "serviceId": 1,
                "officeId": 2,
                "invoiceNumber": "1234567890",
                "isEmergency": true
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let application = body_json(response).await;
    assert_eq!(application["status"], "pending");
    assert_eq!(application["invoiceNumber"], "1234567890");
    assert_eq!(application["isEmergency"], true);

    let response = app
        .clone()
        .oneshot(bearer_request("GET", "/api/applications", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let applications = body_json(response).await;
    assert_eq!(applications.as_array().unwrap().len(), 1);
    assert_eq!(applications[0]["serviceName"], "New Passport Application");
    assert_eq!(applications[0]["officeName"], "Gezira State Office");

    let response = app
        .oneshot(bearer_request("GET", "/api/notifications", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let notifications = body_json(response).await;
    assert_eq!(notifications.as_array().unwrap().len(), 1);
    assert_eq!(
        notifications[0]["title"],
        "Application Submitted: New Passport Application"
    );
    assert_eq!(notifications[0]["type"], "info");
    assert_eq!(notifications[0]["read"], false);
}

#[tokio::test]
async fn test_apply_rejects_bad_invoice_and_unknown_ids() {
    let app = build_app();
    let (_, token) = register(&app).await;

    let response = app
        .clone()
        .oneshot(bearer_request(
            "POST",
            "/api/services/apply",
            &token,
            Some(&json!({"serviceId": 1, "officeId": 1, "invoiceNumber": "12345"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(bearer_request(
            "POST",
            "/api/services/apply",
            &token,
            Some(&json!({"serviceId": 99, "officeId": 1, "invoiceNumber": "1234567890"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid service");
}

#[tokio::test]
async fn test_notifications_newest_first_and_mark_read() {
    let app = build_app();
    let (_, token) = register(&app).await;

    for service_id in [1, 5] {
        let response = app
            .clone()
            .oneshot(bearer_request(
                "POST",
                "/api/services/apply",
                &token,
                Some(&json!({
                    "serviceId": service_id,
                    "officeId": 1,
                    "invoiceNumber": "1234567890"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(bearer_request("GET", "/api/notifications", &token, None))
        .await
        .unwrap();
    let notifications = body_json(response).await;
    assert_eq!(
        notifications[0]["title"],
        "Application Submitted: Birth Certificate"
    );
    assert_eq!(
        notifications[1]["title"],
        "Application Submitted: New Passport Application"
    );

    let id = notifications[0]["id"].as_i64().unwrap();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(bearer_request(
                "PUT",
                &format!("/api/notifications/{id}/read"),
                &token,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["read"], true);
    }

    let response = app
        .oneshot(bearer_request(
            "PUT",
            "/api/notifications/999/read",
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cannot_mark_another_users_notification_read() {
    let app = build_app();
    let (_, owner_token) = register(&app).await;
    let (_, other_token) = register(&app).await;

    let response = app
        .clone()
        .oneshot(bearer_request(
            "POST",
            "/api/services/apply",
            &owner_token,
            Some(&json!({"serviceId": 1, "officeId": 1, "invoiceNumber": "1234567890"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(bearer_request("GET", "/api/notifications", &owner_token, None))
        .await
        .unwrap();
    let notifications = body_json(response).await;
    let id = notifications[0]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(bearer_request(
            "PUT",
            &format!("/api/notifications/{id}/read"),
            &other_token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner's notification is untouched and still theirs to mark.
    let response = app
        .oneshot(bearer_request(
            "PUT",
            &format!("/api/notifications/{id}/read"),
            &owner_token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["read"], true);
}

// ============================================================================
// Misc
// ============================================================================

#[tokio::test]
async fn test_404_for_unknown_endpoint() {
    let app = build_app();

    let request = Request::builder()
        .uri("/api/unknown/endpoint")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_and_request_id_headers_present() {
    let app = build_app();

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://example.com")
        .header("x-request-id", "test-correlation-id")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert!(headers.contains_key("access-control-allow-origin"));
    assert_eq!(
        headers.get("x-request-id").unwrap().to_str().unwrap(),
        "test-correlation-id"
    );
}
