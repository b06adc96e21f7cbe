//! Field-level validation helpers shared by the domain crates.

use crate::error::{DomainError, DomainResult};

/// Length of a normalized phone number (country code + subscriber digits).
pub const PHONE_NUMBER_LEN: usize = 12;

/// Reject empty / whitespace-only required fields.
pub fn require_non_empty(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Basic email shape check (presence of a local part and a domain).
pub fn validate_email(value: &str) -> DomainResult<()> {
    let trimmed = value.trim();
    let valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        return Err(DomainError::validation("invalid email format"));
    }
    Ok(())
}

/// Phone numbers are stored normalized: exactly 12 digits, no separators.
pub fn validate_phone_number(value: &str) -> DomainResult<()> {
    let digits_only = value.chars().all(|c| c.is_ascii_digit());
    if value.len() != PHONE_NUMBER_LEN || !digits_only {
        return Err(DomainError::validation("phone_number must be 12 digits"));
    }
    Ok(())
}
