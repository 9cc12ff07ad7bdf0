//! # DCC Revocation
//!
//! Decides whether a digital COVID certificate appears in a remotely
//! distributed revocation list, fetching only the slices of the list that
//! can contain it.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure business logic, no I/O
//!   - `KidMetadata`, `HashType`, `RevocationMode`: per-KID configuration
//!   - `coordinates_for`: partition addressing from hash prefixes
//!   - `ValidationData`: slices of one partition, deduplicated by content
//!   - `BloomFilter`, `PartialVariableHashFilter`: slice codecs
//!   - `RevocationConfig`: engine configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `RevocationApi`: Driving port (`check`, `is_revoked`)
//!   - `RevocationRepository`, `FilterDecoder`, `Clock`: Driven ports
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `RevocationService`: Implements `RevocationApi`
//!
//! - **Adapters Layer** (`adapters/`): Default implementations of the driven ports
//!
//! ## Decision Rules
//!
//! - A KID without metadata is never revoked
//! - Kinds are tried in order UCI, COUNTRYCODEUCI, SIGNATURE; the first
//!   positive wins
//! - A kind that is disabled, has no candidate hash, or cannot be addressed
//!   is skipped
//! - Repository and decoding failures are errors, never "not revoked"
//!
//! ## Usage Example
//!
//! ```ignore
//! use dcc_revocation::{CandidateHashes, InMemoryRevocationRepository, RevocationApi, RevocationService};
//! use std::sync::Arc;
//!
//! let repository = Arc::new(InMemoryRevocationRepository::new());
//! let service = RevocationService::new(repository);
//!
//! let hashes = CandidateHashes::new().with_uci("f0aa11...");
//! let revoked = service.is_revoked("kid", &hashes).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{DccFilterDecoder, FixedClock, InMemoryRevocationRepository, SystemClock};
pub use domain::{
    coordinates_for, BloomFilter, CandidateHashes, CheckStrategy, ChunkSlice, Coordinates,
    HashType, KidMetadata, MembershipFilter, PartialVariableHashFilter, RevocationConfig,
    RevocationConfigBuilder, RevocationMode, SliceType, ValidationData,
};
pub use error::{DataError, DecodeError, RevocationError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{
    Clock, FilterDecoder, RevocationApi, RevocationCheck, RevocationMatch, RevocationRepository,
};
pub use service::RevocationService;
