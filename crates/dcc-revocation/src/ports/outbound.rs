//! Outbound Ports (Driven Ports)
//!
//! Dependencies the revocation engine needs from its environment: the
//! revocation data repository, slice decoders and a clock.

use async_trait::async_trait;

use crate::domain::{ChunkSlice, Coordinates, KidMetadata, MembershipFilter};
use crate::error::{DataError, DecodeError};

/// Revocation data repository (Driven Port)
///
/// Resolves KID metadata and the slices of one partition. Network access,
/// caching, retries and timeouts are the implementation's concern.
#[async_trait]
pub trait RevocationRepository: Send + Sync {
    /// Metadata for `kid`, or `None` if the KID is not tracked
    async fn get_metadata_by_kid(&self, kid: &str) -> Result<Option<KidMetadata>, DataError>;

    /// Slices of the partition at `coordinates`.
    ///
    /// `as_of_micros` is the current instant in microseconds since the Unix
    /// epoch, passed as freshness metadata.
    async fn get_chunk_slices(
        &self,
        kid: &str,
        coordinates: Coordinates,
        as_of_micros: i64,
    ) -> Result<Vec<ChunkSlice>, DataError>;
}

/// A decoded slice shared across threads
pub type BoxedFilter = Box<dyn MembershipFilter>;

/// Slice decoder (Driven Port)
///
/// Turns raw slice content into a queryable filter.
pub trait FilterDecoder: Send + Sync {
    /// Decode a `BLOOMFILTER` slice
    fn decode_bloom_filter(&self, content: &[u8]) -> Result<BoxedFilter, DecodeError>;

    /// Decode a `VARHASHLIST` slice
    fn decode_hash_list(&self, content: &[u8]) -> Result<BoxedFilter, DecodeError>;
}

/// Source of the freshness timestamp passed to the repository
pub trait Clock: Send + Sync {
    /// Microseconds since the Unix epoch
    fn now_micros(&self) -> i64;
}
