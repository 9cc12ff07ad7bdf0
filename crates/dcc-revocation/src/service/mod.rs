//! Service Layer
//!
//! Contains the application services that orchestrate domain logic
//! and coordinate with external dependencies via ports.

pub mod revocation_service;

pub use revocation_service::RevocationService;
