//! Client company CRUD and contact management.

use atrium_clients::{Client, ClientUpdate, Contact, NewClient, NewContact};
use atrium_core::{ClientId, ContactId, DomainError, DomainResult, Page, PageRequest};

use super::{SharedStore, storage_error};

pub struct ClientService {
    clients: SharedStore<ClientId, Client>,
    contacts: SharedStore<ContactId, Contact>,
}

impl ClientService {
    pub fn new(
        clients: SharedStore<ClientId, Client>,
        contacts: SharedStore<ContactId, Contact>,
    ) -> Self {
        Self { clients, contacts }
    }

    pub fn create(&self, new_client: NewClient) -> DomainResult<Client> {
        new_client.validate()?;
        let client = new_client.into_client(ClientId::new());
        self.clients
            .upsert(client.id, client.clone())
            .map_err(storage_error)?;
        Ok(client)
    }

    /// List clients, searched by name, ordered by name.
    pub fn list(&self, request: &PageRequest) -> DomainResult<Page<Client>> {
        request.validate()?;

        let mut clients = self.clients.list().map_err(storage_error)?;
        if let Some(search) = &request.search {
            let needle = search.to_lowercase();
            clients.retain(|c| c.name.to_lowercase().contains(&needle));
        }
        clients.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });

        Ok(Page::paginate(clients, request))
    }

    pub fn get(&self, id: ClientId) -> DomainResult<Client> {
        self.clients
            .get(&id)
            .map_err(storage_error)?
            .ok_or(DomainError::NotFound)
    }

    pub fn update(&self, id: ClientId, update: ClientUpdate) -> DomainResult<Client> {
        let mut client = self.get(id)?;
        update.apply_to(&mut client)?;
        self.clients
            .upsert(client.id, client.clone())
            .map_err(storage_error)?;
        Ok(client)
    }

    /// Delete a client and its contacts.
    pub fn delete(&self, id: ClientId) -> DomainResult<()> {
        self.get(id)?;

        let contacts = self
            .contacts
            .list()
            .map_err(|e| DomainError::delete_failed(e.to_string()))?;
        for contact in contacts.iter().filter(|c| c.client_id == id) {
            self.contacts
                .remove(&contact.id)
                .map_err(|e| DomainError::delete_failed(e.to_string()))?;
        }

        self.clients
            .remove(&id)
            .map_err(|e| DomainError::delete_failed(e.to_string()))?;
        Ok(())
    }

    pub fn add_contact(&self, client_id: ClientId, new_contact: NewContact) -> DomainResult<Contact> {
        new_contact.validate()?;
        self.get(client_id)?;

        let contact = new_contact.into_contact(ContactId::new(), client_id);
        self.contacts
            .upsert(contact.id, contact.clone())
            .map_err(storage_error)?;
        Ok(contact)
    }

    pub fn contacts(&self, client_id: ClientId) -> DomainResult<Vec<Contact>> {
        self.get(client_id)?;

        let mut contacts: Vec<Contact> = self
            .contacts
            .list()
            .map_err(storage_error)?
            .into_iter()
            .filter(|c| c.client_id == client_id)
            .collect();
        contacts.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_infra::InMemoryStore;
    use std::sync::Arc;

    fn service() -> ClientService {
        ClientService::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
        )
    }

    fn new_client(name: &str) -> NewClient {
        NewClient {
            name: name.to_string(),
            tax_number: 7_700_000_001,
            tax_registration_reason_code: None,
            legal_address: "1 Main St".to_string(),
            actual_address: "1 Main St".to_string(),
            general_director: "Director".to_string(),
            website: None,
            group_name: None,
            branch_name: None,
        }
    }

    fn new_contact(full_name: &str, email: &str) -> NewContact {
        NewContact {
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone_number: "379123456789".to_string(),
            post: "Manager".to_string(),
            description: "primary".to_string(),
            turn_on_notification: true,
        }
    }

    #[test]
    fn list_searches_by_name() {
        let service = service();
        service.create(new_client("Initech")).unwrap();
        service.create(new_client("Globex")).unwrap();
        service.create(new_client("Initrode")).unwrap();

        let page = service
            .list(&PageRequest {
                search: Some("init".to_string()),
                ..Default::default()
            })
            .unwrap();
        let names: Vec<_> = page.items.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["Initech", "Initrode"]);
    }

    #[test]
    fn deleting_a_client_takes_its_contacts() {
        let service = service();
        let client = service.create(new_client("Initech")).unwrap();
        service
            .add_contact(client.id, new_contact("Dana", "dana@initech.example"))
            .unwrap();

        service.delete(client.id).unwrap();
        assert!(matches!(service.get(client.id), Err(DomainError::NotFound)));
        assert!(matches!(
            service.contacts(client.id),
            Err(DomainError::NotFound)
        ));
    }

    #[test]
    fn contacts_require_an_existing_client() {
        let service = service();
        let err = service
            .add_contact(ClientId::new(), new_contact("Dana", "dana@example.com"))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }
}
