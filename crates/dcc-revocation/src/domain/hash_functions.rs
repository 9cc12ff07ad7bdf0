//! Hash functions for revocation Bloom filters
//!
//! Each of the k bit indexes of an element is derived from an independent
//! SHA-256 digest: `SHA-256(element || [i])`, read as an unsigned
//! big-endian integer and reduced modulo the filter size.

use sha2::{Digest, Sha256};

/// Hash function identifier for SHA-256 in the slice header
pub const HASH_FUNCTION_SHA256: u8 = 0;

/// Reduce a big-endian unsigned integer modulo `m`
fn reduce_be(bytes: &[u8], m: u64) -> u64 {
    let m = u128::from(m);
    let rem = bytes
        .iter()
        .fold(0u128, |acc, &b| ((acc << 8) | u128::from(b)) % m);
    rem as u64
}

/// Compute the bit index of `element` for hash function `i`
pub fn hash_index(element: &[u8], i: u8, m: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(element);
    hasher.update([i]);
    let digest = hasher.finalize();
    reduce_be(&digest, m)
}

/// Compute k bit positions for an element
pub fn compute_hash_positions(element: &[u8], k: usize, m: usize) -> Vec<usize> {
    (0..k)
        .map(|i| hash_index(element, i as u8, m as u64) as usize)
        .collect()
}
