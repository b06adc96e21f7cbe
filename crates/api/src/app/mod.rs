//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services/`: business logic over the storage seam (one file per area)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: error classification and response dispatch

use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower::ServiceBuilder;

use atrium_auth::{Hs256TokenEngine, TokenEngine};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Seed administrator account created on an empty deployment.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub login: String,
    pub password: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HMAC secret shared by token issuance and validation.
    pub secret_key: String,
    pub bind_addr: String,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl AppConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            bind_addr: "0.0.0.0:8080".to_string(),
            bootstrap_admin: None,
        }
    }

    pub fn with_bootstrap_admin(
        mut self,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.bootstrap_admin = Some(BootstrapAdmin {
            login: login.into(),
            password: password.into(),
        });
        self
    }

    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        let secret_key = std::env::var("ATRIUM_SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("ATRIUM_SECRET_KEY not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let bind_addr =
            std::env::var("ATRIUM_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let bootstrap_admin = match (
            std::env::var("ATRIUM_ADMIN_LOGIN"),
            std::env::var("ATRIUM_ADMIN_PASSWORD"),
        ) {
            (Ok(login), Ok(password)) => Some(BootstrapAdmin { login, password }),
            _ => None,
        };

        Self {
            secret_key,
            bind_addr,
            bootstrap_admin,
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(config: &AppConfig) -> Router {
    let tokens: Arc<dyn TokenEngine> =
        Arc::new(Hs256TokenEngine::new(config.secret_key.as_bytes()));
    let auth_state = middleware::AuthState {
        tokens: tokens.clone(),
    };

    let services = Arc::new(services::build_services(tokens));

    if let Some(admin) = &config.bootstrap_admin {
        services::seed_admin(&services, &admin.login, &admin.password);
    }

    // Protected routes: require a valid access token.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/refresh", post(routes::auth::refresh))
        .merge(protected)
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
