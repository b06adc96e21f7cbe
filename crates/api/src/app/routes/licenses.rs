use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use atrium_core::LicenseRequestId;
use atrium_licensing::{NewComponent, NewLicensePurchase, NewLicenseRequest, NewLicenseType};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn types_router() -> Router {
    Router::new().route("/", get(list_license_types).post(create_license_type))
}

pub fn components_router() -> Router {
    Router::new().route("/", get(list_components).post(create_component))
}

pub fn requests_router() -> Router {
    Router::new()
        .route("/", get(list_requests).post(create_request))
        .route("/:id", get(get_request).delete(delete_request))
        .route("/:id/issue", post(issue_request))
}

pub fn purchases_router() -> Router {
    Router::new().route("/", get(list_purchases).post(create_purchase))
}

pub async fn create_license_type(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewLicenseType>,
) -> axum::response::Response {
    match services.licensing.create_license_type(body) {
        Ok(license_type) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "license_type": dto::license_type_to_json(&license_type),
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn list_license_types(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.licensing.list_license_types() {
        Ok(types) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "license_types": types.iter().map(dto::license_type_to_json).collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn create_component(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewComponent>,
) -> axum::response::Response {
    match services.licensing.create_component(body) {
        Ok(component) => (
            StatusCode::OK,
            Json(serde_json::json!({ "component": dto::component_to_json(&component) })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn list_components(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.licensing.list_components() {
        Ok(components) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "components": components.iter().map(dto::component_to_json).collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn create_request(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewLicenseRequest>,
) -> axum::response::Response {
    match services.licensing.create_request(body) {
        Ok(request) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "license_request": dto::license_request_to_json(&request),
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn list_requests(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.licensing.list_requests() {
        Ok(requests) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "license_requests": requests
                    .iter()
                    .map(dto::license_request_to_json)
                    .collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn get_request(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: LicenseRequestId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_response(&services.errors, &e),
    };

    match services.licensing.get_request(id) {
        Ok(request) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "license_request": dto::license_request_to_json(&request),
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn issue_request(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: LicenseRequestId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_response(&services.errors, &e),
    };

    match services.licensing.mark_issued(id) {
        Ok(request) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "license_request": dto::license_request_to_json(&request),
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn delete_request(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: LicenseRequestId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_response(&services.errors, &e),
    };

    match services.licensing.delete_request(id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn create_purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewLicensePurchase>,
) -> axum::response::Response {
    match services.licensing.create_purchase(body) {
        Ok(purchase) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "license_purchase": dto::license_purchase_to_json(&purchase),
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}

pub async fn list_purchases(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.licensing.list_purchases() {
        Ok(purchases) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "license_purchases": purchases
                    .iter()
                    .map(dto::license_purchase_to_json)
                    .collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => errors::error_response(&services.errors, &e),
    }
}
