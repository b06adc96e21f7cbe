//! `atrium-identity` — user accounts and the role model.

pub mod role;
pub mod user;

pub use role::RoleName;
pub use user::{
    NewUser, PasswordChange, PasswordInput, User, UserOrderField, UserRecord, UserUpdate,
    default_order, parse_order_by,
};
