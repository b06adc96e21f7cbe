//! Completed license purchase.

use serde::{Deserialize, Serialize};

use atrium_core::{ClientId, ComponentId, DomainError, DomainResult, LicensePurchaseId, LicenseTypeId};

/// A paid-for license allocation.
///
/// # Invariants
/// - At most one purchase per (client, component, license type) triple
///   (enforced by the service layer).
/// - `device_count` is strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensePurchase {
    pub id: LicensePurchaseId,
    pub client_id: ClientId,
    pub component_id: ComponentId,
    pub license_type_id: LicenseTypeId,
    pub device_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLicensePurchase {
    pub client_id: ClientId,
    pub component_id: ComponentId,
    pub license_type_id: LicenseTypeId,
    pub device_count: u32,
}

impl NewLicensePurchase {
    pub fn validate(&self) -> DomainResult<()> {
        if self.device_count == 0 {
            return Err(DomainError::validation("device_count must be positive"));
        }
        Ok(())
    }

    pub fn into_purchase(self, id: LicensePurchaseId) -> LicensePurchase {
        LicensePurchase {
            id,
            client_id: self.client_id,
            component_id: self.component_id,
            license_type_id: self.license_type_id,
            device_count: self.device_count,
        }
    }

    /// Key used for the uniqueness invariant.
    pub fn dedup_key(&self) -> (ClientId, ComponentId, LicenseTypeId) {
        (self.client_id, self.component_id, self.license_type_id)
    }
}
