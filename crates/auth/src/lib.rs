//! `atrium-auth` — token issuance/validation policy and credential hashing.
//!
//! This crate is intentionally decoupled from HTTP and storage: tokens go in
//! and out as strings, claims as a plain JSON mapping.

pub mod engine;
pub mod password;
pub mod policy;

pub use engine::{
    CLAIM_EXPIRES_AT, CLAIM_ISSUED_AT, CLAIM_SUBJECT, CLAIM_TOKEN_TYPE, Claims, Hs256TokenEngine,
    TokenEngine, TokenError, TokenPair, subject, token_kind,
};
pub use password::{PasswordError, hash_password, verify_password};
pub use policy::TokenKind;
