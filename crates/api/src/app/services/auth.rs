//! Authentication flows over the token engine.

use std::sync::Arc;

use serde_json::json;

use atrium_auth::{Claims, TokenEngine, TokenError, TokenKind, TokenPair, verify_password};
use atrium_clients::Client;
use atrium_core::{ClientId, DomainError, DomainResult, UserId};
use atrium_identity::{User, UserRecord};

use super::{SharedStore, storage_error};

pub struct AuthService {
    users: SharedStore<UserId, User>,
    clients: SharedStore<ClientId, Client>,
    tokens: Arc<dyn TokenEngine>,
}

/// Successful login: the user plus a fresh access/refresh pair.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: UserRecord,
    pub tokens: TokenPair,
}

/// Successful refresh: the user plus a fresh access token only.
pub struct RefreshOutcome {
    pub user: UserRecord,
    pub access_token: String,
}

impl AuthService {
    pub fn new(
        users: SharedStore<UserId, User>,
        clients: SharedStore<ClientId, Client>,
        tokens: Arc<dyn TokenEngine>,
    ) -> Self {
        Self {
            users,
            clients,
            tokens,
        }
    }

    pub fn login(&self, login: &str, password: &str) -> DomainResult<LoginOutcome> {
        let user = self.find_by_login(login)?.ok_or_else(invalid_credentials)?;

        if verify_password(password, &user.password_hash).is_err() {
            return Err(invalid_credentials());
        }
        if !user.active {
            return Err(DomainError::permission("account is inactive or blocked"));
        }

        let record = self.record(user)?;
        let access_token = self
            .tokens
            .issue(TokenKind::Access, access_claims(&record))
            .map_err(issue_error)?;
        let refresh_token = self
            .tokens
            .issue(TokenKind::Refresh, refresh_claims(&record.user))
            .map_err(issue_error)?;

        Ok(LoginOutcome {
            user: record,
            tokens: TokenPair {
                access_token,
                refresh_token,
            },
        })
    }

    /// Resolve an access token to its user.
    pub fn authenticate(&self, token: &str) -> DomainResult<UserRecord> {
        let user = self.user_from_token(token, TokenKind::Access)?;
        self.record(user)
    }

    /// Exchange a refresh token for a new access token.
    pub fn refresh(&self, token: &str) -> DomainResult<RefreshOutcome> {
        let user = self.user_from_token(token, TokenKind::Refresh)?;
        let record = self.record(user)?;

        let access_token = self
            .tokens
            .issue(TokenKind::Access, access_claims(&record))
            .map_err(issue_error)?;

        Ok(RefreshOutcome {
            user: record,
            access_token,
        })
    }

    pub fn logout(&self) {
        // TODO: invalidate the user's session entries once a session store exists.
    }

    fn user_from_token(&self, token: &str, expected: TokenKind) -> DomainResult<User> {
        let claims = self
            .tokens
            .validate(token)
            .map_err(|_: TokenError| invalid_token())?;

        if atrium_auth::token_kind(&claims) != Some(expected) {
            return Err(invalid_token());
        }

        let user_id: UserId = atrium_auth::subject(&claims)
            .and_then(|sub| sub.parse().ok())
            .ok_or_else(invalid_token)?;

        self.users
            .get(&user_id)
            .map_err(storage_error)?
            .ok_or_else(invalid_token)
    }

    fn find_by_login(&self, login: &str) -> DomainResult<Option<User>> {
        let users = self.users.list().map_err(storage_error)?;
        Ok(users.into_iter().find(|u| u.login == login))
    }

    fn record(&self, user: User) -> DomainResult<UserRecord> {
        let client_name = match user.client_id {
            Some(client_id) => self
                .clients
                .get(&client_id)
                .map_err(storage_error)?
                .map(|c| c.name),
            None => None,
        };
        Ok(UserRecord { user, client_name })
    }
}

fn invalid_credentials() -> DomainError {
    DomainError::auth("invalid credentials: check your login or password")
}

fn invalid_token() -> DomainError {
    DomainError::auth("invalid token")
}

fn issue_error(e: TokenError) -> DomainError {
    DomainError::storage(e.to_string())
}

fn access_claims(record: &UserRecord) -> Claims {
    let mut claims = Claims::new();
    claims.insert("sub".to_string(), json!(record.user.id));
    claims.insert("login".to_string(), json!(record.user.login));
    claims.insert("role_name".to_string(), json!(record.role_name()));
    claims.insert("client_name".to_string(), json!(record.client_name));
    claims
}

fn refresh_claims(user: &User) -> Claims {
    let mut claims = Claims::new();
    claims.insert("sub".to_string(), json!(user.id));
    claims
}
