//! Authentication middleware and client address extraction.
//!
//! The middleware validates the JWT bearer token from the Authorization
//! header and injects the verified identity into request extensions for
//! downstream handlers.
//!
//! # Extracting the identity
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use cp_server::api::middleware::AuthUser;
//!
//! async fn protected_handler(Extension(user): Extension<AuthUser>) -> String {
//!     format!("Authenticated as user {}", user.id)
//! }
//! # let _ = protected_handler;
//! ```

use axum::{
    Json,
    extract::{ConnectInfo, FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use super::{AppState, ErrorResponse, error};

/// Verified identity injected into request extensions by [`auth_middleware`]
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub national_number: String,
}

/// Authentication middleware that validates bearer tokens.
///
/// # Behavior
///
/// - **Success**: Token valid → injects [`AuthUser`] into request
///   extensions → calls next handler
/// - **Missing header**: `401` with "Authentication required"
/// - **Invalid/expired token**: `403` with "Invalid or expired token"
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = auth_header else {
        return Err(error(StatusCode::UNAUTHORIZED, "Authentication required"));
    };

    match state.auth_manager.verify_access_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser {
                id: claims.sub,
                national_number: claims.national_number,
            });
            Ok(next.run(request).await)
        }
        Err(_) => Err(error(StatusCode::FORBIDDEN, "Invalid or expired token")),
    }
}

/// Client IP address, resolved from proxy headers or the socket peer.
///
/// `x-forwarded-for` (first hop) and `x-real-ip` take precedence so the
/// limiter keys on the original client when the server sits behind a
/// reverse proxy; otherwise the TCP peer address is used.
#[derive(Debug, Clone, Copy)]
pub struct ClientAddr(pub IpAddr);

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(',').next())
                .and_then(|value| value.trim().parse::<IpAddr>().ok())
        };

        let ip = from_header("x-forwarded-for")
            .or_else(|| from_header("x-real-ip"))
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip())
            })
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        Ok(ClientAddr(ip))
    }
}
