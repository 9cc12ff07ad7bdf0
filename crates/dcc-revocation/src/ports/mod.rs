//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for credential validators
//! - Driven Ports (outbound) - Repository, slice decoding, time

pub mod inbound;
pub mod outbound;

pub use inbound::{RevocationApi, RevocationCheck, RevocationMatch};
pub use outbound::{BoxedFilter, Clock, FilterDecoder, RevocationRepository};
