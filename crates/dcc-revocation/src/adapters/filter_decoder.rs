//! Default slice decoder
//!
//! Decodes slices in the wire formats of [`BloomFilter`] and
//! [`PartialVariableHashFilter`].

use crate::domain::{BloomFilter, PartialVariableHashFilter};
use crate::error::DecodeError;
use crate::ports::{BoxedFilter, FilterDecoder};

/// Decoder for the standard revocation slice formats
#[derive(Clone, Copy, Debug, Default)]
pub struct DccFilterDecoder;

impl FilterDecoder for DccFilterDecoder {
    fn decode_bloom_filter(&self, content: &[u8]) -> Result<BoxedFilter, DecodeError> {
        Ok(Box::new(BloomFilter::from_bytes(content)?))
    }

    fn decode_hash_list(&self, content: &[u8]) -> Result<BoxedFilter, DecodeError> {
        Ok(Box::new(PartialVariableHashFilter::from_bytes(content)?))
    }
}
