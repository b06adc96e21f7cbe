//! Request/response DTOs and JSON mapping helpers.

use serde::Deserialize;
use serde_json::json;

use atrium_clients::{Client, Contact};
use atrium_core::{ClientId, DomainResult, PageRequest, SortOrder, UserId, page};
use atrium_identity::{
    NewUser, PasswordChange, PasswordInput, RoleName, UserOrderField, UserRecord, UserUpdate,
    default_order, parse_order_by,
};
use atrium_licensing::{Component, LicensePurchase, LicenseRequest, LicenseType};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub login: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default = "default_true")]
    pub status: bool,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    pub role: RoleName,
}

fn default_true() -> bool {
    true
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            login: self.login,
            password: PasswordInput {
                password: self.password,
                confirm_password: self.confirm_password,
            },
            active: self.status,
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            client_id: self.client_id,
            role: self.role,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PasswordChangeRequest {
    pub old_password: String,
    pub new_password: String,
}

/// PATCH body for a user. Absent fields are left untouched; `client_id`
/// cannot be cleared through this endpoint, only replaced.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub login: Option<String>,
    pub status: Option<bool>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub client_id: Option<ClientId>,
    pub role: Option<RoleName>,
    pub password: Option<PasswordChangeRequest>,
}

impl UpdateUserRequest {
    pub fn into_update(self) -> UserUpdate {
        UserUpdate {
            login: self.login,
            active: self.status,
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            client_id: self.client_id.map(Some),
            role: self.role,
            password: self.password.map(|p| PasswordChange {
                old_password: p.old_password,
                new_password: p.new_password,
            }),
        }
    }
}

/// Query parameters for user listings.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub search: Option<String>,
    /// Ordering expression, e.g. `login:desc,id`.
    #[serde(default)]
    pub order_by: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    page::DEFAULT_PAGE_SIZE
}

impl UserListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            page_size: self.page_size,
            search: self.search.clone(),
        }
    }

    pub fn order(&self) -> DomainResult<Vec<(UserOrderField, SortOrder)>> {
        match &self.order_by {
            Some(expr) => parse_order_by(expr),
            None => Ok(default_order()),
        }
    }
}

/// Query parameters for bulk user deletion: `?ids=<id>,<id>,...`.
#[derive(Debug, Deserialize)]
pub struct DeleteUsersQuery {
    pub ids: String,
}

impl DeleteUsersQuery {
    pub fn user_ids(&self) -> DomainResult<Vec<UserId>> {
        self.ids
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<UserId>())
            .collect()
    }
}

/// Query parameters for client listings.
#[derive(Debug, Deserialize)]
pub struct ClientListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub search: Option<String>,
}

impl ClientListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            page_size: self.page_size,
            search: self.search.clone(),
        }
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn user_to_json(record: &UserRecord) -> serde_json::Value {
    json!({
        "id": record.user.id,
        "login": record.user.login,
        "status": record.user.active,
        "full_name": record.user.full_name,
        "email": record.user.email,
        "phone_number": record.user.phone_number,
        "client_id": record.user.client_id,
        "role_name": record.role_name(),
        "client_name": record.client_name,
    })
}

pub fn client_to_json(client: &Client) -> serde_json::Value {
    json!({
        "id": client.id,
        "name": client.name,
        "tax_number": client.tax_number,
        "tax_registration_reason_code": client.tax_registration_reason_code,
        "legal_address": client.legal_address,
        "actual_address": client.actual_address,
        "general_director": client.general_director,
        "website": client.website,
        "group_name": client.group_name,
        "branch_name": client.branch_name,
    })
}

pub fn contact_to_json(contact: &Contact) -> serde_json::Value {
    json!({
        "id": contact.id,
        "client_id": contact.client_id,
        "full_name": contact.full_name,
        "email": contact.email,
        "phone_number": contact.phone_number,
        "post": contact.post,
        "description": contact.description,
        "turn_on_notification": contact.turn_on_notification,
    })
}

pub fn license_type_to_json(license_type: &LicenseType) -> serde_json::Value {
    json!({
        "id": license_type.id,
        "name": license_type.name,
    })
}

/// Private key material never leaves the backend.
pub fn component_to_json(component: &Component) -> serde_json::Value {
    json!({
        "id": component.id,
        "name": component.name,
        "module_rsa_pub": component.module_rsa_pub,
        "server_rsa_pub": component.server_rsa_pub,
    })
}

pub fn license_request_to_json(request: &LicenseRequest) -> serde_json::Value {
    json!({
        "id": request.id,
        "client_id": request.client_id,
        "component_id": request.component_id,
        "license_type_id": request.license_type_id,
        "license_expiration_date": request.license_expiration_date,
        "technical_support_expiration_date": request.technical_support_expiration_date,
        "request_creation_mode": request.request_creation_mode.as_str(),
        "is_license_issued": request.is_license_issued,
    })
}

pub fn license_purchase_to_json(purchase: &LicensePurchase) -> serde_json::Value {
    json!({
        "id": purchase.id,
        "client_id": purchase.client_id,
        "component_id": purchase.component_id,
        "license_type_id": purchase.license_type_id,
        "device_count": purchase.device_count,
    })
}
