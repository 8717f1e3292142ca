//! Citizen services portal server.
//!
//! Serves the portal's HTTP API with in-memory storage, JWT sessions,
//! and per-IP login rate limiting.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use civic_portal::{
    applications::ApplicationManager,
    auth::AuthManager,
    notify::NotificationManager,
    security::LoginRateLimiter,
    store::{MemStorage, Storage},
};
use cp_server::api::{self, AppState};
use cp_server::config::ServerConfig;
use cp_server::logging;
use pico_args::Arguments;
use tracing::info;

const HELP: &str = "\
Run a citizen services portal server

USAGE:
  cp_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:5000]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:5000)
  JWT_SECRET               JWT signing secret (required, >= 32 chars)
  PASSWORD_PEPPER          Password hashing pepper (required, >= 16 chars)
  LOGIN_MAX_ATTEMPTS       Failed logins before lockout  [default: 5]
  LOGIN_LOCKOUT_SECS       Lockout duration in seconds   [default: 900]
  RATE_LIMIT_SWEEP_SECS    Stale-entry sweep interval    [default: 300]
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;

    logging::init();

    let config = ServerConfig::from_env(bind_override)
        .map_err(|e| anyhow::anyhow!("Configuration error: {e}"))?;

    info!("Starting citizen portal server at {}", config.bind);

    let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());

    let auth_manager = Arc::new(AuthManager::new(
        Arc::clone(&storage),
        config.security.password_pepper.clone(),
        config.security.jwt_secret.clone(),
    ));
    let notification_manager = NotificationManager::new(Arc::clone(&storage));
    let application_manager = Arc::new(ApplicationManager::new(
        Arc::clone(&storage),
        notification_manager.clone(),
    ));
    let login_limiter = Arc::new(LoginRateLimiter::new(
        config.rate_limit.max_attempts,
        config.rate_limit.lockout,
    ));

    // Keep the limiter map bounded by evicting idle addresses.
    let sweeper = Arc::clone(&login_limiter);
    let sweep_interval = config.rate_limit.sweep_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        interval.tick().await;
        loop {
            interval.tick().await;
            let evicted = sweeper.sweep_expired().await;
            if evicted > 0 {
                tracing::debug!(evicted, "Swept stale login attempt records");
            }
        }
    });

    let api_state = AppState {
        auth_manager,
        application_manager,
        notification_manager: Arc::new(notification_manager),
        storage,
        login_limiter,
    };

    let app = api::create_router(api_state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {e}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {e}"))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
