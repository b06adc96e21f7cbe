//! Contact person attached to a client company.

use serde::{Deserialize, Serialize};

use atrium_core::{ClientId, ContactId, DomainResult, validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub client_id: ClientId,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    /// Job title.
    pub post: String,
    pub description: String,
    pub turn_on_notification: bool,
}

/// Command to attach a contact to a client.
#[derive(Debug, Clone, Deserialize)]
pub struct NewContact {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub post: String,
    pub description: String,
    pub turn_on_notification: bool,
}

impl NewContact {
    pub fn validate(&self) -> DomainResult<()> {
        validate::require_non_empty("full_name", &self.full_name)?;
        validate::require_non_empty("post", &self.post)?;
        validate::validate_email(&self.email)?;
        validate::validate_phone_number(&self.phone_number)?;
        Ok(())
    }

    pub fn into_contact(self, id: ContactId, client_id: ClientId) -> Contact {
        Contact {
            id,
            client_id,
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            post: self.post,
            description: self.description,
            turn_on_notification: self.turn_on_notification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_validation_covers_email_and_phone() {
        let mut contact = NewContact {
            full_name: "Dana".to_string(),
            email: "dana@initech.example".to_string(),
            phone_number: "379123456789".to_string(),
            post: "CTO".to_string(),
            description: "technical escalation".to_string(),
            turn_on_notification: true,
        };
        assert!(contact.validate().is_ok());

        contact.email = "dana".to_string();
        assert!(contact.validate().is_err());
    }
}
