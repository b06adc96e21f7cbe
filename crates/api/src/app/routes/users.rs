use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use atrium_core::UserId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route(
            "/",
            get(list_users).post(create_user).delete(delete_users),
        )
        .route("/:id", get(get_user).patch(update_user))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateUserRequest>,
) -> axum::response::Response {
    match services.users.create(body.into_new_user()) {
        Ok(record) => (
            StatusCode::OK,
            Json(serde_json::json!({ "user": dto::user_to_json(&record) })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::UserListQuery>,
) -> axum::response::Response {
    let order = match query.order() {
        Ok(order) => order,
        Err(e) => return errors::error_response(&services.errors, &e),
    };

    match services.users.list(&query.page_request(), &order) {
        Ok(page) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "users": page.items.iter().map(dto::user_to_json).collect::<Vec<_>>(),
                "page": page.page,
                "page_size": page.page_size,
                "total_page": page.total_page,
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_response(&services.errors, &e),
    };

    match services.users.get(id) {
        Ok(record) => (
            StatusCode::OK,
            Json(serde_json::json!({ "user": dto::user_to_json(&record) })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_response(&services.errors, &e),
    };

    match services.users.update(id, body.into_update()) {
        Ok(record) => (
            StatusCode::OK,
            Json(serde_json::json!({ "user": dto::user_to_json(&record) })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn delete_users(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::DeleteUsersQuery>,
) -> axum::response::Response {
    let ids = match query.user_ids() {
        Ok(ids) => ids,
        Err(e) => return errors::error_response(&services.errors, &e),
    };

    match services.users.delete(&ids) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}
