//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - KID metadata and candidate hash types
//! - Partition addressing
//! - Slice partitioning and deduplication
//! - Bloom filter and partial hash list slice codecs
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod addressing;
pub mod bloom_filter;
pub mod candidate;
pub mod config;
pub mod filter;
pub mod hash_functions;
pub mod metadata;
pub mod parameters;
pub mod partial_hash_filter;
pub mod slice;
pub mod wire;

pub use addressing::{coordinates_for, Coordinates};
pub use bloom_filter::BloomFilter;
pub use candidate::CandidateHashes;
pub use config::{CheckStrategy, RevocationConfig, RevocationConfigBuilder};
pub use filter::MembershipFilter;
pub use metadata::{HashType, KidMetadata, RevocationMode};
pub use parameters::{calculate_optimal_parameters, BloomFilterParams};
pub use partial_hash_filter::PartialVariableHashFilter;
pub use slice::{ChunkSlice, SliceType, ValidationData};
