//! `atrium-infra` — storage abstractions backing the admin services.

pub mod store;

pub use store::{InMemoryStore, Store, StoreError};
