//! Domain layer - business logic and services

pub mod repository;
pub mod service;
pub mod update;
pub mod validation;

pub use repository::EntitlementRepository;
pub use service::Service;
