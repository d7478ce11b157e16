//! Entitlement Service Module
//!
//! CRUD, conjunctive search and field-masked partial updates over the
//! `entitlements` table, exposed as a JSON REST API and as an in-process
//! [`EntitlementsApi`] client.

// Public exports
pub mod contract;
pub use contract::{
    client::EntitlementsApi, error::EntitlementError, Entitlement, EntitlementField,
    EntitlementPatch, EntitlementStatus, FieldMask, NewEntitlement, Page, PageRequest,
    SearchCriteria,
};

pub mod module;
pub use module::EntitlementServiceModule;

pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
