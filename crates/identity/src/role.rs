//! Role model.
//!
//! Roles are a closed set, not a table: the backend only ever distinguishes
//! these three, and a closed enum keeps role checks total.

use serde::{Deserialize, Serialize};

use atrium_core::DomainError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleName {
    /// External client-company account; must be attached to a client.
    Client,
    Administrator,
    Operator,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Client => "Client",
            RoleName::Administrator => "Administrator",
            RoleName::Operator => "Operator",
        }
    }
}

impl core::fmt::Display for RoleName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for RoleName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Client" => Ok(RoleName::Client),
            "Administrator" => Ok(RoleName::Administrator),
            "Operator" => Ok(RoleName::Operator),
            other => Err(DomainError::validation(format!("unknown role '{other}'"))),
        }
    }
}
