//! Service layer: business rules over the storage seam.
//!
//! Services are plain structs over `Arc<dyn Store<..>>` handles; the HTTP
//! handlers own request/response mapping and nothing else.

pub mod auth;
pub mod clients;
pub mod licenses;
pub mod users;

pub use auth::{AuthService, LoginOutcome, RefreshOutcome};
pub use clients::ClientService;
pub use licenses::LicensingService;
pub use users::UserService;

use std::sync::Arc;

use atrium_auth::TokenEngine;
use atrium_clients::{Client, Contact};
use atrium_core::{
    ClientId, ComponentId, ContactId, DomainError, LicensePurchaseId, LicenseRequestId,
    LicenseTypeId, UserId,
};
use atrium_identity::{NewUser, PasswordInput, RoleName, User};
use atrium_infra::{InMemoryStore, Store, StoreError};
use atrium_licensing::{Component, LicensePurchase, LicenseRequest, LicenseType};

use crate::app::errors::ErrorDispatcher;

/// Shared handle to a store implementation.
pub type SharedStore<K, V> = Arc<dyn Store<K, V>>;

/// All services plus the error-dispatch registry, shared across handlers.
pub struct AppServices {
    pub auth: AuthService,
    pub users: UserService,
    pub clients: ClientService,
    pub licensing: LicensingService,
    pub errors: ErrorDispatcher,
}

/// Build the service graph over in-memory stores.
pub fn build_services(tokens: Arc<dyn TokenEngine>) -> AppServices {
    let users: SharedStore<UserId, User> = Arc::new(InMemoryStore::new());
    let clients: SharedStore<ClientId, Client> = Arc::new(InMemoryStore::new());
    let contacts: SharedStore<ContactId, Contact> = Arc::new(InMemoryStore::new());
    let license_types: SharedStore<LicenseTypeId, LicenseType> = Arc::new(InMemoryStore::new());
    let components: SharedStore<ComponentId, Component> = Arc::new(InMemoryStore::new());
    let requests: SharedStore<LicenseRequestId, LicenseRequest> = Arc::new(InMemoryStore::new());
    let purchases: SharedStore<LicensePurchaseId, LicensePurchase> =
        Arc::new(InMemoryStore::new());

    AppServices {
        auth: AuthService::new(users.clone(), clients.clone(), tokens),
        users: UserService::new(users, clients.clone()),
        clients: ClientService::new(clients.clone(), contacts),
        licensing: LicensingService::new(clients, license_types, components, requests, purchases),
        errors: ErrorDispatcher::with_builtin_handlers(),
    }
}

/// Seed the bootstrap administrator account (no-op if the login exists).
pub fn seed_admin(services: &AppServices, login: &str, password: &str) {
    match services.users.find_by_login(login) {
        Ok(Some(_)) => return,
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e, "could not check for existing administrator account");
            return;
        }
    }

    let new_user = NewUser {
        login: login.to_string(),
        password: PasswordInput {
            password: password.to_string(),
            confirm_password: password.to_string(),
        },
        active: true,
        full_name: "Administrator".to_string(),
        email: "admin@atrium.local".to_string(),
        phone_number: "000000000000".to_string(),
        client_id: None,
        role: RoleName::Administrator,
    };

    match services.users.create(new_user) {
        Ok(_) => tracing::info!(login, "seeded administrator account"),
        Err(e) => tracing::warn!(error = %e, "failed to seed administrator account"),
    }
}

pub(crate) fn storage_error(e: StoreError) -> DomainError {
    DomainError::storage(e.to_string())
}
