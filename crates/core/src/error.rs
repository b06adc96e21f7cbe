//! Domain error model.
//!
//! Error kinds form a **closed set**: every variant carries its own structured
//! payload, and `ErrorKind` is the tag the response-dispatch layer keys on.
//! New failure modes get a new variant, not a stringly-typed subcode.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// auth, deletion). Infrastructure failures enter through `Storage`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A resource deletion could not be carried out by the storage layer.
    #[error("delete failed: {0}")]
    DeleteFailed(String),

    /// Authentication failure (bad credentials, unusable token).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("permission denied: {0}")]
    Permission(String),

    /// A requested resource was not found.
    #[error("not found")]
    NotFound,

    /// A uniqueness or state conflict.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The storage backend failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Tag identifying a [`DomainError`] variant.
///
/// This is what the error-dispatch registry keys on: exact-kind lookup, no
/// hierarchy, so every kind must be mapped deliberately.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    DeleteFailed,
    Auth,
    Permission,
    NotFound,
    Conflict,
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::DeleteFailed => "delete_failed",
            ErrorKind::Auth => "auth",
            ErrorKind::Permission => "permission",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Storage => "storage",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn delete_failed(msg: impl Into<String>) -> Self {
        Self::DeleteFailed(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn permission(msg: impl Into<String>) -> Self {
        Self::Permission(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// The kind tag used for dispatch-table lookup.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::DeleteFailed(_) => ErrorKind::DeleteFailed,
            DomainError::Auth(_) => ErrorKind::Auth,
            DomainError::Permission(_) => ErrorKind::Permission,
            DomainError::NotFound => ErrorKind::NotFound,
            DomainError::Conflict(_) => ErrorKind::Conflict,
            DomainError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Raw error text, as exposed in the `detail` field of error responses.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(msg)
            | DomainError::DeleteFailed(msg)
            | DomainError::Auth(msg)
            | DomainError::Permission(msg)
            | DomainError::Conflict(msg)
            | DomainError::Storage(msg) => msg,
            DomainError::NotFound => "not found",
        }
    }
}
