//! License catalog, requests, and purchases.

use atrium_clients::Client;
use atrium_core::{
    ClientId, ComponentId, DomainError, DomainResult, LicensePurchaseId, LicenseRequestId,
    LicenseTypeId,
};
use atrium_licensing::{
    Component, LicensePurchase, LicenseRequest, LicenseType, NewComponent, NewLicensePurchase,
    NewLicenseRequest, NewLicenseType,
};

use super::{SharedStore, storage_error};

pub struct LicensingService {
    clients: SharedStore<ClientId, Client>,
    license_types: SharedStore<LicenseTypeId, LicenseType>,
    components: SharedStore<ComponentId, Component>,
    requests: SharedStore<LicenseRequestId, LicenseRequest>,
    purchases: SharedStore<LicensePurchaseId, LicensePurchase>,
}

impl LicensingService {
    pub fn new(
        clients: SharedStore<ClientId, Client>,
        license_types: SharedStore<LicenseTypeId, LicenseType>,
        components: SharedStore<ComponentId, Component>,
        requests: SharedStore<LicenseRequestId, LicenseRequest>,
        purchases: SharedStore<LicensePurchaseId, LicensePurchase>,
    ) -> Self {
        Self {
            clients,
            license_types,
            components,
            requests,
            purchases,
        }
    }

    // ---- catalog

    pub fn create_license_type(&self, new_type: NewLicenseType) -> DomainResult<LicenseType> {
        new_type.validate()?;
        let license_type = new_type.into_license_type(LicenseTypeId::new());
        self.license_types
            .upsert(license_type.id, license_type.clone())
            .map_err(storage_error)?;
        Ok(license_type)
    }

    pub fn list_license_types(&self) -> DomainResult<Vec<LicenseType>> {
        let mut types = self.license_types.list().map_err(storage_error)?;
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    pub fn create_component(&self, new_component: NewComponent) -> DomainResult<Component> {
        new_component.validate()?;
        let component = new_component.into_component(ComponentId::new());
        self.components
            .upsert(component.id, component.clone())
            .map_err(storage_error)?;
        Ok(component)
    }

    pub fn list_components(&self) -> DomainResult<Vec<Component>> {
        let mut components = self.components.list().map_err(storage_error)?;
        components.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(components)
    }

    // ---- requests

    pub fn create_request(&self, new_request: NewLicenseRequest) -> DomainResult<LicenseRequest> {
        new_request.validate()?;
        self.ensure_references(
            new_request.client_id,
            new_request.component_id,
            new_request.license_type_id,
        )?;

        let request = new_request.into_request(LicenseRequestId::new());
        self.requests
            .upsert(request.id, request.clone())
            .map_err(storage_error)?;
        Ok(request)
    }

    pub fn list_requests(&self) -> DomainResult<Vec<LicenseRequest>> {
        let mut requests = self.requests.list().map_err(storage_error)?;
        requests.sort_by(|a, b| a.id.as_uuid().cmp(b.id.as_uuid()));
        Ok(requests)
    }

    pub fn get_request(&self, id: LicenseRequestId) -> DomainResult<LicenseRequest> {
        self.requests
            .get(&id)
            .map_err(storage_error)?
            .ok_or(DomainError::NotFound)
    }

    /// Mark a request fulfilled; a request is only issued once.
    pub fn mark_issued(&self, id: LicenseRequestId) -> DomainResult<LicenseRequest> {
        let mut request = self.get_request(id)?;
        if request.is_license_issued {
            return Err(DomainError::conflict("license already issued"));
        }
        request.is_license_issued = true;
        self.requests
            .upsert(request.id, request.clone())
            .map_err(storage_error)?;
        Ok(request)
    }

    pub fn delete_request(&self, id: LicenseRequestId) -> DomainResult<()> {
        let removed = self
            .requests
            .remove(&id)
            .map_err(|e| DomainError::delete_failed(e.to_string()))?;
        if !removed {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    // ---- purchases

    pub fn create_purchase(&self, new_purchase: NewLicensePurchase) -> DomainResult<LicensePurchase> {
        new_purchase.validate()?;
        self.ensure_references(
            new_purchase.client_id,
            new_purchase.component_id,
            new_purchase.license_type_id,
        )?;

        let key = new_purchase.dedup_key();
        let exists = self
            .purchases
            .list()
            .map_err(storage_error)?
            .iter()
            .any(|p| (p.client_id, p.component_id, p.license_type_id) == key);
        if exists {
            return Err(DomainError::conflict(
                "purchase already exists for this client, component and license type",
            ));
        }

        let purchase = new_purchase.into_purchase(LicensePurchaseId::new());
        self.purchases
            .upsert(purchase.id, purchase.clone())
            .map_err(storage_error)?;
        Ok(purchase)
    }

    pub fn list_purchases(&self) -> DomainResult<Vec<LicensePurchase>> {
        let mut purchases = self.purchases.list().map_err(storage_error)?;
        purchases.sort_by(|a, b| a.id.as_uuid().cmp(b.id.as_uuid()));
        Ok(purchases)
    }

    fn ensure_references(
        &self,
        client_id: ClientId,
        component_id: ComponentId,
        license_type_id: LicenseTypeId,
    ) -> DomainResult<()> {
        if self.clients.get(&client_id).map_err(storage_error)?.is_none() {
            return Err(DomainError::validation("unknown client"));
        }
        if self
            .components
            .get(&component_id)
            .map_err(storage_error)?
            .is_none()
        {
            return Err(DomainError::validation("unknown component"));
        }
        if self
            .license_types
            .get(&license_type_id)
            .map_err(storage_error)?
            .is_none()
        {
            return Err(DomainError::validation("unknown license type"));
        }
        Ok(())
    }
}
