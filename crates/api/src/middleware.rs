use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use atrium_auth::{TokenEngine, TokenKind};
use atrium_core::UserId;

use crate::context::AuthContext;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenEngine>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let claims = state
        .tokens
        .validate(token)
        .map_err(|_e| StatusCode::UNAUTHORIZED)?;

    // Only access tokens are bearer credentials; refresh tokens must not
    // authorize requests even when their signature and expiry are fine.
    if atrium_auth::token_kind(&claims) != Some(TokenKind::Access) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user_id: UserId = atrium_auth::subject(&claims)
        .and_then(|sub| sub.parse().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let login = claims
        .get("login")
        .and_then(|v| v.as_str())
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_string();

    let role = claims
        .get("role_name")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut()
        .insert(AuthContext::new(user_id, login, role));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
