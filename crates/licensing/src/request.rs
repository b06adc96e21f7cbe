//! License request lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atrium_core::{ClientId, ComponentId, DomainError, DomainResult, LicenseRequestId, LicenseTypeId};

/// How the request entered the system.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CreationMode {
    #[default]
    Auto,
    Manual,
}

impl CreationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreationMode::Auto => "auto",
            CreationMode::Manual => "manual",
        }
    }
}

/// A client's request for a license on a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRequest {
    pub id: LicenseRequestId,
    pub client_id: ClientId,
    pub component_id: ComponentId,
    pub license_type_id: LicenseTypeId,
    pub license_expiration_date: DateTime<Utc>,
    pub technical_support_expiration_date: DateTime<Utc>,
    pub request_creation_mode: CreationMode,
    pub is_license_issued: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLicenseRequest {
    pub client_id: ClientId,
    pub component_id: ComponentId,
    pub license_type_id: LicenseTypeId,
    pub license_expiration_date: DateTime<Utc>,
    pub technical_support_expiration_date: DateTime<Utc>,
    #[serde(default)]
    pub request_creation_mode: CreationMode,
}

impl NewLicenseRequest {
    pub fn validate(&self) -> DomainResult<()> {
        if self.technical_support_expiration_date > self.license_expiration_date {
            return Err(DomainError::validation(
                "technical support cannot outlive the license",
            ));
        }
        Ok(())
    }

    pub fn into_request(self, id: LicenseRequestId) -> LicenseRequest {
        LicenseRequest {
            id,
            client_id: self.client_id,
            component_id: self.component_id,
            license_type_id: self.license_type_id,
            license_expiration_date: self.license_expiration_date,
            technical_support_expiration_date: self.technical_support_expiration_date,
            request_creation_mode: self.request_creation_mode,
            is_license_issued: false,
        }
    }
}
