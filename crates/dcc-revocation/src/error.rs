//! Error types for the revocation subsystem
//!
//! Only failures that prevent a verdict from being computed live here.
//! Unknown KIDs, disabled hash kinds, absent or malformed candidate hashes
//! and unresolvable partition addresses are not errors: they resolve to
//! "not revoked" for the affected aspect.

use thiserror::Error;

use crate::domain::HashType;

/// Errors that can occur while answering a revocation query
#[derive(Debug, Error)]
pub enum RevocationError {
    #[error("Repository error: {0}")]
    Data(#[from] DataError),

    #[error("Failed to decode {hash_type} slice: {source}")]
    Decode {
        hash_type: HashType,
        #[source]
        source: DecodeError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors from the revocation data repository
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Too many slices for partition: {count} > {max}")]
    TooManySlices { count: usize, max: usize },
}

/// Errors from decoding a slice payload into a filter
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Payload truncated: needed {needed} more bytes")]
    Truncated { needed: usize },

    #[error("Unsupported filter version: {0}")]
    UnsupportedVersion(u16),

    #[error("Unsupported hash function id: {0}")]
    UnsupportedHashFunction(u8),

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("{0} trailing bytes after filter payload")]
    TrailingBytes(usize),

    #[error("Slice too large: {size} > {max} bytes")]
    SliceTooLarge { size: usize, max: usize },
}
