//! Licensable software component.

use serde::{Deserialize, Serialize};

use atrium_core::{ComponentId, DomainError, DomainResult, validate};

/// Maximum component name length.
pub const MAX_NAME_LEN: usize = 25;

/// A component licenses are issued against.
///
/// The RSA fields hold PEM-encoded key material used when signing license
/// files; they are optional until the component is provisioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub module_rsa_pub: Option<String>,
    pub server_rsa_pub: Option<String>,
    pub server_rsa_private: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComponent {
    pub name: String,
    pub module_rsa_pub: Option<String>,
    pub server_rsa_pub: Option<String>,
    pub server_rsa_private: Option<String>,
}

impl NewComponent {
    pub fn validate(&self) -> DomainResult<()> {
        validate::require_non_empty("name", &self.name)?;
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        Ok(())
    }

    pub fn into_component(self, id: ComponentId) -> Component {
        Component {
            id,
            name: self.name,
            module_rsa_pub: self.module_rsa_pub,
            server_rsa_pub: self.server_rsa_pub,
            server_rsa_private: self.server_rsa_private,
        }
    }
}
