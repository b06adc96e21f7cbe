//! Client company entity.

use serde::{Deserialize, Serialize};

use atrium_core::{ClientId, DomainResult, validate};

/// A client company that buys licenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub tax_number: i64,
    pub tax_registration_reason_code: Option<i64>,
    pub legal_address: String,
    pub actual_address: String,
    pub general_director: String,
    pub website: Option<String>,
    pub group_name: Option<String>,
    pub branch_name: Option<String>,
}

/// Command to register a client company.
#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub tax_number: i64,
    pub tax_registration_reason_code: Option<i64>,
    pub legal_address: String,
    pub actual_address: String,
    pub general_director: String,
    pub website: Option<String>,
    pub group_name: Option<String>,
    pub branch_name: Option<String>,
}

impl NewClient {
    pub fn validate(&self) -> DomainResult<()> {
        validate::require_non_empty("name", &self.name)?;
        validate::require_non_empty("legal_address", &self.legal_address)?;
        validate::require_non_empty("actual_address", &self.actual_address)?;
        validate::require_non_empty("general_director", &self.general_director)?;
        if self.tax_number <= 0 {
            return Err(atrium_core::DomainError::validation(
                "tax_number must be positive",
            ));
        }
        Ok(())
    }

    pub fn into_client(self, id: ClientId) -> Client {
        Client {
            id,
            name: self.name,
            tax_number: self.tax_number,
            tax_registration_reason_code: self.tax_registration_reason_code,
            legal_address: self.legal_address,
            actual_address: self.actual_address,
            general_director: self.general_director,
            website: self.website,
            group_name: self.group_name,
            branch_name: self.branch_name,
        }
    }
}

/// Command to update a client; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub tax_number: Option<i64>,
    pub tax_registration_reason_code: Option<Option<i64>>,
    pub legal_address: Option<String>,
    pub actual_address: Option<String>,
    pub general_director: Option<String>,
    pub website: Option<Option<String>>,
    pub group_name: Option<Option<String>>,
    pub branch_name: Option<Option<String>>,
}

impl ClientUpdate {
    pub fn apply_to(&self, client: &mut Client) -> DomainResult<()> {
        if let Some(name) = &self.name {
            validate::require_non_empty("name", name)?;
            client.name = name.clone();
        }
        if let Some(tax_number) = self.tax_number {
            if tax_number <= 0 {
                return Err(atrium_core::DomainError::validation(
                    "tax_number must be positive",
                ));
            }
            client.tax_number = tax_number;
        }
        if let Some(code) = self.tax_registration_reason_code {
            client.tax_registration_reason_code = code;
        }
        if let Some(legal_address) = &self.legal_address {
            validate::require_non_empty("legal_address", legal_address)?;
            client.legal_address = legal_address.clone();
        }
        if let Some(actual_address) = &self.actual_address {
            validate::require_non_empty("actual_address", actual_address)?;
            client.actual_address = actual_address.clone();
        }
        if let Some(general_director) = &self.general_director {
            validate::require_non_empty("general_director", general_director)?;
            client.general_director = general_director.clone();
        }
        if let Some(website) = &self.website {
            client.website = website.clone();
        }
        if let Some(group_name) = &self.group_name {
            client.group_name = group_name.clone();
        }
        if let Some(branch_name) = &self.branch_name {
            client.branch_name = branch_name.clone();
        }
        Ok(())
    }
}
