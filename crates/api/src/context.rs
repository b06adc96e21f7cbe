use atrium_core::UserId;
use atrium_identity::RoleName;

/// Authenticated identity for a request.
///
/// Inserted by the auth middleware; present on all protected routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    user_id: UserId,
    login: String,
    role: RoleName,
}

impl AuthContext {
    pub fn new(user_id: UserId, login: String, role: RoleName) -> Self {
        Self {
            user_id,
            login,
            role,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn role(&self) -> RoleName {
        self.role
    }
}
