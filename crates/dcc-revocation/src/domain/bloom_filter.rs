//! Bloom filter revocation slices
//!
//! INVARIANTS:
//! - No false negatives: if inserted, `might_contain()` MUST return true
//! - FPR = (1 - e^(-kn/m))^k, bounded by the producer's chosen parameters
//!
//! The engine treats a positive from this filter as a revocation even
//! though it may be a false positive. The producer sizes each slice so
//! that the false-positive rate is acceptable as a revocation signal; a
//! valid credential hitting a false positive is reported as revoked.
//!
//! Payload layout (big-endian):
//!
//! ```text
//! u16  version            (1)
//! u32  number of hashes   (k)
//! u8   hash function id   (0 = SHA-256)
//! f32  probability rate
//! u32  defined element count
//! u32  current element count
//! u32  data length        (words)
//! u32* data
//! ```

use bitvec::prelude::*;

use super::filter::MembershipFilter;
use super::hash_functions::{compute_hash_positions, HASH_FUNCTION_SHA256};
use super::parameters::{calculate_fpr, calculate_optimal_parameters, MAX_HASH_COUNT, WORD_BITS};
use super::wire::SliceReader;
use crate::error::DecodeError;

/// Supported payload version
pub const BLOOM_FILTER_VERSION: u16 = 1;

/// Bloom filter decoded from (or encoded into) a revocation slice
#[derive(Clone, Debug)]
pub struct BloomFilter {
    /// Bit array, 32-bit words, least significant bit first
    bits: BitVec<u32, Lsb0>,
    /// Number of hash functions (k)
    k: usize,
    /// Size in bits (m)
    m: usize,
    /// Producer's target false positive rate
    probability_rate: f32,
    /// Capacity the producer sized the filter for
    defined_elements: u32,
    /// Number of elements inserted (n)
    n: u32,
}

impl BloomFilter {
    /// Create an empty filter with `words` 32-bit words and `k` hash functions
    pub fn new(words: usize, k: usize) -> Self {
        let words = words.max(1);
        Self {
            bits: BitVec::from_vec(vec![0u32; words]),
            k: k.clamp(1, MAX_HASH_COUNT),
            m: words * WORD_BITS,
            probability_rate: 0.0,
            defined_elements: 0,
            n: 0,
        }
    }

    /// Create an empty filter sized for `expected_elements` at `target_fpr`
    pub fn new_with_fpr(expected_elements: usize, target_fpr: f64) -> Self {
        let params = calculate_optimal_parameters(expected_elements, target_fpr);
        let mut filter = Self::new(params.word_count(), params.hash_count);
        filter.probability_rate = target_fpr as f32;
        filter.defined_elements = u32::try_from(expected_elements).unwrap_or(u32::MAX);
        filter
    }

    /// Decode a filter from slice content
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = SliceReader::new(bytes);

        let version = reader.read_u16()?;
        if version != BLOOM_FILTER_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }

        let k = reader.read_u32()? as usize;
        if k == 0 || k > MAX_HASH_COUNT {
            return Err(DecodeError::InvalidParameters(format!(
                "number of hashes {} outside 1..={}",
                k, MAX_HASH_COUNT
            )));
        }

        let hash_function = reader.read_u8()?;
        if hash_function != HASH_FUNCTION_SHA256 {
            return Err(DecodeError::UnsupportedHashFunction(hash_function));
        }

        let probability_rate = reader.read_f32()?;
        let defined_elements = reader.read_u32()?;
        let n = reader.read_u32()?;

        let words = reader.read_u32()? as usize;
        if words == 0 {
            return Err(DecodeError::InvalidParameters(
                "data length cannot be 0".to_string(),
            ));
        }
        // Checked before allocating so a hostile length cannot force a large buffer
        if reader.remaining() < words.saturating_mul(4) {
            return Err(DecodeError::Truncated {
                needed: words.saturating_mul(4) - reader.remaining(),
            });
        }

        let mut data = Vec::with_capacity(words);
        for _ in 0..words {
            data.push(reader.read_u32()?);
        }
        reader.finish()?;

        Ok(Self {
            bits: BitVec::from_vec(data),
            k,
            m: words * WORD_BITS,
            probability_rate,
            defined_elements,
            n,
        })
    }

    /// Encode the filter as slice content
    pub fn to_bytes(&self) -> Vec<u8> {
        let words = self.bits.as_raw_slice();
        let mut out = Vec::with_capacity(23 + words.len() * 4);
        out.extend_from_slice(&BLOOM_FILTER_VERSION.to_be_bytes());
        out.extend_from_slice(&(self.k as u32).to_be_bytes());
        out.push(HASH_FUNCTION_SHA256);
        out.extend_from_slice(&self.probability_rate.to_be_bytes());
        out.extend_from_slice(&self.defined_elements.to_be_bytes());
        out.extend_from_slice(&self.n.to_be_bytes());
        out.extend_from_slice(&(words.len() as u32).to_be_bytes());
        for word in words {
            out.extend_from_slice(&word.to_be_bytes());
        }
        out
    }

    /// Insert an element into the filter
    pub fn insert(&mut self, element: &[u8]) {
        for pos in compute_hash_positions(element, self.k, self.m) {
            self.bits.set(pos, true);
        }
        self.n = self.n.saturating_add(1);
    }

    /// Test if an element might be in the filter
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element is definitely NOT in the set
    pub fn contains(&self, element: &[u8]) -> bool {
        compute_hash_positions(element, self.k, self.m)
            .iter()
            .all(|&pos| self.bits[pos])
    }

    /// Theoretical false positive rate at the current fill
    pub fn false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.n as usize, self.k)
    }

    pub fn size_bits(&self) -> usize {
        self.m
    }

    pub fn hash_count(&self) -> usize {
        self.k
    }

    pub fn elements_inserted(&self) -> u32 {
        self.n
    }

    pub fn probability_rate(&self) -> f32 {
        self.probability_rate
    }
}

impl MembershipFilter for BloomFilter {
    fn might_contain(&self, candidate: &[u8]) -> bool {
        self.contains(candidate)
    }
}
