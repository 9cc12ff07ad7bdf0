//! Bloom filter sizing for revocation slices
//!
//! Formulas:
//! - m = -n*ln(fpr) / (ln(2)^2)  -- optimal bits
//! - k = (m/n) * ln(2)           -- optimal hash functions
//!
//! Slices store the bit array as 32-bit words, so `m` is always rounded up
//! to a whole number of words.

use std::f64::consts::LN_2;

/// Bits per storage word of the slice bit array
pub const WORD_BITS: usize = 32;

/// Upper bound on k accepted from a slice header
pub const MAX_HASH_COUNT: usize = 64;

/// Bloom filter parameters
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterParams {
    /// Number of bits in the filter (multiple of 32)
    pub size_bits: usize,
    /// Number of hash functions
    pub hash_count: usize,
    /// Expected false positive rate with these parameters
    pub expected_fpr: f64,
}

impl BloomFilterParams {
    /// Number of 32-bit words backing the bit array
    pub fn word_count(&self) -> usize {
        self.size_bits / WORD_BITS
    }
}

/// Calculate optimal Bloom filter parameters for given constraints
pub fn calculate_optimal_parameters(num_elements: usize, target_fpr: f64) -> BloomFilterParams {
    if num_elements == 0 {
        return BloomFilterParams {
            size_bits: WORD_BITS,
            hash_count: 1,
            expected_fpr: 0.0,
        };
    }

    let n = num_elements as f64;
    let ln2_squared = LN_2 * LN_2;

    let m = (-n * target_fpr.ln() / ln2_squared).ceil() as usize;
    let m = m.max(1).div_ceil(WORD_BITS) * WORD_BITS;

    let k = ((m as f64 / n) * LN_2).round() as usize;
    let k = k.clamp(1, MAX_HASH_COUNT);

    let expected_fpr = calculate_fpr(m, num_elements, k);

    BloomFilterParams {
        size_bits: m,
        hash_count: k,
        expected_fpr,
    }
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
