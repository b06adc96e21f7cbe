//! License type catalog entry.

use serde::{Deserialize, Serialize};

use atrium_core::{DomainError, DomainResult, LicenseTypeId, validate};

/// Maximum license type name length.
pub const MAX_NAME_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseType {
    pub id: LicenseTypeId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLicenseType {
    pub name: String,
}

impl NewLicenseType {
    pub fn validate(&self) -> DomainResult<()> {
        validate::require_non_empty("name", &self.name)?;
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        Ok(())
    }

    pub fn into_license_type(self, id: LicenseTypeId) -> LicenseType {
        LicenseType {
            id,
            name: self.name,
        }
    }
}
