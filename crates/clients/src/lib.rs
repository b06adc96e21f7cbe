//! `atrium-clients` — client companies and their contact persons.

pub mod client;
pub mod contact;

pub use client::{Client, ClientUpdate, NewClient};
pub use contact::{Contact, NewContact};
