use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AuthContext;

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    match services.auth.login(&body.login, &body.password) {
        Ok(outcome) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "user": dto::user_to_json(&outcome.user),
                "token": outcome.tokens,
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn refresh(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RefreshRequest>,
) -> axum::response::Response {
    match services.auth.refresh(&body.refresh_token) {
        Ok(outcome) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "user": dto::user_to_json(&outcome.user),
                "access_token": outcome.access_token,
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
) -> axum::response::Response {
    match services.users.get(auth.user_id()) {
        Ok(record) => (
            StatusCode::OK,
            Json(serde_json::json!({ "user": dto::user_to_json(&record) })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    services.auth.logout();
    StatusCode::NO_CONTENT.into_response()
}
