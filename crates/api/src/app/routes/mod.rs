use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod clients;
pub mod licenses;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/logout", post(auth::logout))
        .nest("/users", users::router())
        .nest("/clients", clients::router())
        .nest("/license-types", licenses::types_router())
        .nest("/components", licenses::components_router())
        .nest("/license-requests", licenses::requests_router())
        .nest("/license-purchases", licenses::purchases_router())
}
