//! User CRUD: hashing, uniqueness, search/ordering/pagination.

use std::cmp::Ordering;

use atrium_auth::{hash_password, verify_password};
use atrium_clients::Client;
use atrium_core::{ClientId, DomainError, DomainResult, Page, PageRequest, SortOrder, UserId};
use atrium_identity::{NewUser, User, UserOrderField, UserRecord, UserUpdate};

use super::{SharedStore, storage_error};

pub struct UserService {
    users: SharedStore<UserId, User>,
    clients: SharedStore<ClientId, Client>,
}

impl UserService {
    pub fn new(users: SharedStore<UserId, User>, clients: SharedStore<ClientId, Client>) -> Self {
        Self { users, clients }
    }

    pub fn create(&self, new_user: NewUser) -> DomainResult<UserRecord> {
        new_user.validate()?;

        if self.find_by_login(&new_user.login)?.is_some() {
            return Err(DomainError::conflict(format!(
                "login '{}' is already in use",
                new_user.login
            )));
        }
        if let Some(client_id) = new_user.client_id {
            self.ensure_client_exists(client_id)?;
        }

        let password_hash = hash_password(&new_user.password.password)
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            login: new_user.login,
            password_hash,
            active: new_user.active,
            full_name: new_user.full_name,
            email: new_user.email,
            phone_number: new_user.phone_number,
            client_id: new_user.client_id,
            role: new_user.role,
        };

        self.users
            .upsert(user.id, user.clone())
            .map_err(storage_error)?;

        self.record(user)
    }

    /// List users: optional login search, multi-field ordering, pagination.
    pub fn list(
        &self,
        request: &PageRequest,
        order_by: &[(UserOrderField, SortOrder)],
    ) -> DomainResult<Page<UserRecord>> {
        request.validate()?;

        let mut records = Vec::new();
        for user in self.users.list().map_err(storage_error)? {
            records.push(self.record(user)?);
        }

        if let Some(search) = &request.search {
            let needle = search.to_lowercase();
            records.retain(|r| r.user.login.to_lowercase().contains(&needle));
        }

        sort_records(&mut records, order_by);

        Ok(Page::paginate(records, request))
    }

    pub fn get(&self, id: UserId) -> DomainResult<UserRecord> {
        let user = self
            .users
            .get(&id)
            .map_err(storage_error)?
            .ok_or(DomainError::NotFound)?;
        self.record(user)
    }

    pub fn update(&self, id: UserId, update: UserUpdate) -> DomainResult<UserRecord> {
        update.validate()?;

        let mut user = self
            .users
            .get(&id)
            .map_err(storage_error)?
            .ok_or(DomainError::NotFound)?;

        if let Some(login) = &update.login {
            if login != &user.login && self.find_by_login(login)?.is_some() {
                return Err(DomainError::conflict(format!(
                    "login '{login}' is already in use"
                )));
            }
        }

        // The password change needs the stored hash, so it is applied here
        // rather than in `UserUpdate::apply_to`.
        if let Some(change) = &update.password {
            verify_password(&change.old_password, &user.password_hash)
                .map_err(|_| DomainError::validation("old password is incorrect"))?;
            user.password_hash = hash_password(&change.new_password)
                .map_err(|e| DomainError::storage(e.to_string()))?;
        }

        update.apply_to(&mut user)?;

        if let Some(client_id) = user.client_id {
            self.ensure_client_exists(client_id)?;
        }

        self.users
            .upsert(user.id, user.clone())
            .map_err(storage_error)?;

        self.record(user)
    }

    /// Bulk delete. Missing ids are skipped; storage failures abort.
    pub fn delete(&self, ids: &[UserId]) -> DomainResult<()> {
        for id in ids {
            self.users
                .remove(id)
                .map_err(|e| DomainError::delete_failed(e.to_string()))?;
        }
        Ok(())
    }

    pub fn find_by_login(&self, login: &str) -> DomainResult<Option<User>> {
        let users = self.users.list().map_err(storage_error)?;
        Ok(users.into_iter().find(|u| u.login == login))
    }

    fn ensure_client_exists(&self, client_id: ClientId) -> DomainResult<()> {
        match self.clients.get(&client_id).map_err(storage_error)? {
            Some(_) => Ok(()),
            None => Err(DomainError::validation("client's company is missing")),
        }
    }

    fn record(&self, user: User) -> DomainResult<UserRecord> {
        let client_name = match user.client_id {
            Some(client_id) => self
                .clients
                .get(&client_id)
                .map_err(storage_error)?
                .map(|c| c.name),
            None => None,
        };
        Ok(UserRecord { user, client_name })
    }
}

fn sort_records(records: &mut [UserRecord], order_by: &[(UserOrderField, SortOrder)]) {
    records.sort_by(|a, b| {
        for (field, direction) in order_by {
            let ordering = match field {
                UserOrderField::Id => a.user.id.as_uuid().cmp(b.user.id.as_uuid()),
                UserOrderField::Login => a.user.login.cmp(&b.user.login),
                UserOrderField::Status => a.user.active.cmp(&b.user.active),
                UserOrderField::RoleName => a.role_name().cmp(b.role_name()),
                UserOrderField::ClientName => a.client_name.cmp(&b.client_name),
            };
            let ordering = match direction {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_identity::{PasswordInput, RoleName, default_order};
    use atrium_infra::InMemoryStore;
    use std::sync::Arc;

    fn service() -> UserService {
        UserService::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
        )
    }

    fn new_user(login: &str) -> NewUser {
        NewUser {
            login: login.to_string(),
            password: PasswordInput {
                password: "operator-secret-1".to_string(),
                confirm_password: "operator-secret-1".to_string(),
            },
            active: true,
            full_name: format!("{login} full name"),
            email: format!("{login}@example.com"),
            phone_number: "379123456789".to_string(),
            client_id: None,
            role: RoleName::Operator,
        }
    }

    #[test]
    fn create_hashes_the_password() {
        let service = service();
        let record = service.create(new_user("alice")).unwrap();
        assert_ne!(record.user.password_hash, "operator-secret-1");
        assert!(record.user.password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn duplicate_login_is_a_conflict() {
        let service = service();
        service.create(new_user("alice")).unwrap();
        let err = service.create(new_user("alice")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn unknown_client_reference_is_rejected() {
        let service = service();
        let mut user = new_user("bob");
        user.role = RoleName::Client;
        user.client_id = Some(ClientId::new());
        let err = service.create(user).unwrap_err();
        assert_eq!(err.detail(), "client's company is missing");
    }

    #[test]
    fn list_searches_orders_and_paginates() {
        let service = service();
        for login in ["edgar", "alice", "albert", "carol"] {
            service.create(new_user(login)).unwrap();
        }

        // Search narrows by login substring.
        let page = service
            .list(
                &PageRequest {
                    search: Some("al".to_string()),
                    ..Default::default()
                },
                &default_order(),
            )
            .unwrap();
        let logins: Vec<_> = page.items.iter().map(|r| r.user.login.clone()).collect();
        assert_eq!(logins.len(), 2);
        assert!(logins.contains(&"alice".to_string()));
        assert!(logins.contains(&"albert".to_string()));

        // Descending login order.
        let page = service
            .list(
                &PageRequest::default(),
                &[(UserOrderField::Login, SortOrder::Desc)],
            )
            .unwrap();
        let logins: Vec<_> = page.items.iter().map(|r| r.user.login.clone()).collect();
        assert_eq!(logins, vec!["edgar", "carol", "alice", "albert"]);

        // Page slicing and total count.
        let page = service
            .list(
                &PageRequest {
                    page: 1,
                    page_size: 10,
                    search: None,
                },
                &default_order(),
            )
            .unwrap();
        assert_eq!(page.total_page, 1);
        assert_eq!(page.items.len(), 4);
    }

    #[test]
    fn password_change_requires_the_old_password() {
        let service = service();
        let record = service.create(new_user("carol")).unwrap();

        let wrong = UserUpdate {
            password: Some(atrium_identity::PasswordChange {
                old_password: "not-the-password".to_string(),
                new_password: "next-secret-123".to_string(),
            }),
            ..Default::default()
        };
        let err = service.update(record.user.id, wrong).unwrap_err();
        assert_eq!(err.detail(), "old password is incorrect");

        let right = UserUpdate {
            password: Some(atrium_identity::PasswordChange {
                old_password: "operator-secret-1".to_string(),
                new_password: "next-secret-123".to_string(),
            }),
            ..Default::default()
        };
        let updated = service.update(record.user.id, right).unwrap();
        assert!(verify_password("next-secret-123", &updated.user.password_hash).is_ok());
    }

    #[test]
    fn delete_removes_listed_ids() {
        let service = service();
        let first = service.create(new_user("dave")).unwrap();
        let second = service.create(new_user("erin")).unwrap();

        service.delete(&[first.user.id]).unwrap();
        assert!(matches!(
            service.get(first.user.id),
            Err(DomainError::NotFound)
        ));
        assert!(service.get(second.user.id).is_ok());
    }
}
