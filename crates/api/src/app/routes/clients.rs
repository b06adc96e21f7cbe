use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use atrium_clients::{ClientUpdate, NewClient, NewContact};
use atrium_core::ClientId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:id",
            get(get_client).patch(update_client).delete(delete_client),
        )
        .route("/:id/contacts", get(list_contacts).post(add_contact))
}

pub async fn create_client(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewClient>,
) -> axum::response::Response {
    match services.clients.create(body) {
        Ok(client) => (
            StatusCode::OK,
            Json(serde_json::json!({ "client": dto::client_to_json(&client) })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn list_clients(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ClientListQuery>,
) -> axum::response::Response {
    match services.clients.list(&query.page_request()) {
        Ok(page) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "clients": page.items.iter().map(dto::client_to_json).collect::<Vec<_>>(),
                "page": page.page,
                "page_size": page.page_size,
                "total_page": page.total_page,
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn get_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ClientId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_response(&services.errors, &e),
    };

    match services.clients.get(id) {
        Ok(client) => (
            StatusCode::OK,
            Json(serde_json::json!({ "client": dto::client_to_json(&client) })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn update_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<ClientUpdate>,
) -> axum::response::Response {
    let id: ClientId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_response(&services.errors, &e),
    };

    match services.clients.update(id, body) {
        Ok(client) => (
            StatusCode::OK,
            Json(serde_json::json!({ "client": dto::client_to_json(&client) })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn delete_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ClientId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_response(&services.errors, &e),
    };

    match services.clients.delete(id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn add_contact(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<NewContact>,
) -> axum::response::Response {
    let id: ClientId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_response(&services.errors, &e),
    };

    match services.clients.add_contact(id, body) {
        Ok(contact) => (
            StatusCode::OK,
            Json(serde_json::json!({ "contact": dto::contact_to_json(&contact) })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn list_contacts(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ClientId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_response(&services.errors, &e),
    };

    match services.clients.contacts(id) {
        Ok(contacts) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "contacts": contacts.iter().map(dto::contact_to_json).collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}
