//! `atrium-licensing` — license catalog, requests, and purchases.

pub mod component;
pub mod license_type;
pub mod purchase;
pub mod request;

pub use component::{Component, NewComponent};
pub use license_type::{LicenseType, NewLicenseType};
pub use purchase::{LicensePurchase, NewLicensePurchase};
pub use request::{CreationMode, LicenseRequest, NewLicenseRequest};
