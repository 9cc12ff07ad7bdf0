//! Adapters Layer (Driven Adapters)
//!
//! Implementations of the driven ports.
//!
//! ## Adapters
//!
//! - `InMemoryRevocationRepository` - Metadata and slices held in memory
//! - `DccFilterDecoder` - Decodes Bloom filter and partial hash list slices
//! - `SystemClock` / `FixedClock` - Freshness timestamp sources

pub mod clock;
pub mod filter_decoder;
pub mod in_memory;

pub use clock::{FixedClock, SystemClock};
pub use filter_decoder::DccFilterDecoder;
pub use in_memory::{InMemoryRevocationRepository, SliceRequest};
