//! User account entity and its change commands.

use serde::{Deserialize, Serialize};

use atrium_core::{ClientId, DomainError, DomainResult, SortOrder, UserId, validate};

use crate::role::RoleName;

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A stored user account.
///
/// # Invariants
/// - `login` is unique across all users (enforced by the service layer).
/// - A `Client`-role user always references a client company.
/// - `password_hash` is a PHC-format argon2 hash, never a plaintext password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub login: String,
    pub password_hash: String,
    /// Inactive accounts cannot authenticate.
    pub active: bool,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub client_id: Option<ClientId>,
    pub role: RoleName,
}

/// A user joined with the display names API responses carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user: User,
    pub client_name: Option<String>,
}

impl UserRecord {
    pub fn role_name(&self) -> &'static str {
        self.user.role.as_str()
    }
}

/// Password + confirmation as supplied on account creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PasswordInput {
    pub password: String,
    pub confirm_password: String,
}

impl PasswordInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.password != self.confirm_password {
            return Err(DomainError::validation(
                "password confirmation does not match",
            ));
        }
        Ok(())
    }
}

/// Old + new password as supplied on a password change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> DomainResult<()> {
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Command to create a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub password: PasswordInput,
    pub active: bool,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub client_id: Option<ClientId>,
    pub role: RoleName,
}

impl NewUser {
    pub fn validate(&self) -> DomainResult<()> {
        validate::require_non_empty("login", &self.login)?;
        validate::require_non_empty("full_name", &self.full_name)?;
        validate::validate_email(&self.email)?;
        validate::validate_phone_number(&self.phone_number)?;
        self.password.validate()?;
        ensure_client_reference(self.role, self.client_id)?;
        Ok(())
    }
}

/// Command to update a user; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub login: Option<String>,
    pub active: Option<bool>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub client_id: Option<Option<ClientId>>,
    pub role: Option<RoleName>,
    pub password: Option<PasswordChange>,
}

impl UserUpdate {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(login) = &self.login {
            validate::require_non_empty("login", login)?;
        }
        if let Some(full_name) = &self.full_name {
            validate::require_non_empty("full_name", full_name)?;
        }
        if let Some(email) = &self.email {
            validate::validate_email(email)?;
        }
        if let Some(phone_number) = &self.phone_number {
            validate::validate_phone_number(phone_number)?;
        }
        if let Some(change) = &self.password {
            change.validate()?;
        }
        Ok(())
    }

    /// Fold the non-password fields into `user`.
    ///
    /// The password change is applied separately by the service layer (it
    /// needs the stored hash to check the old password).
    pub fn apply_to(&self, user: &mut User) -> DomainResult<()> {
        if let Some(login) = &self.login {
            user.login = login.clone();
        }
        if let Some(active) = self.active {
            user.active = active;
        }
        if let Some(full_name) = &self.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(phone_number) = &self.phone_number {
            user.phone_number = phone_number.clone();
        }
        if let Some(client_id) = self.client_id {
            user.client_id = client_id;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        ensure_client_reference(user.role, user.client_id)
    }
}

fn ensure_client_reference(role: RoleName, client_id: Option<ClientId>) -> DomainResult<()> {
    if role == RoleName::Client && client_id.is_none() {
        return Err(DomainError::validation("client's company is missing"));
    }
    Ok(())
}

/// Fields user listings can be ordered by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserOrderField {
    Id,
    Login,
    Status,
    RoleName,
    ClientName,
}

impl core::str::FromStr for UserOrderField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(UserOrderField::Id),
            "login" => Ok(UserOrderField::Login),
            "status" => Ok(UserOrderField::Status),
            "role_name" => Ok(UserOrderField::RoleName),
            "client_name" => Ok(UserOrderField::ClientName),
            other => Err(DomainError::validation(format!(
                "unknown order field '{other}'"
            ))),
        }
    }
}

/// Parse an `order_by` expression like `"login:desc,id:asc"`.
///
/// Direction defaults to ascending when omitted (`"login,id"`).
pub fn parse_order_by(expr: &str) -> DomainResult<Vec<(UserOrderField, SortOrder)>> {
    let mut order = Vec::new();
    for part in expr.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (field, direction) = match part.split_once(':') {
            Some((field, direction)) => (field.parse()?, direction.parse()?),
            None => (part.parse()?, SortOrder::Asc),
        };
        order.push((field, direction));
    }
    if order.is_empty() {
        return Err(DomainError::validation("order_by cannot be empty"));
    }
    Ok(order)
}

/// Default listing order.
pub fn default_order() -> Vec<(UserOrderField, SortOrder)> {
    vec![(UserOrderField::Id, SortOrder::Asc)]
}
