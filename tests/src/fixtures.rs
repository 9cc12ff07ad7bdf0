//! Test fixtures: credential hashes and encoded revocation slices

use rand::Rng;
use sha2::{Digest, Sha256};

use dcc_revocation::{
    coordinates_for, BloomFilter, ChunkSlice, Coordinates, PartialVariableHashFilter,
    RevocationMode,
};

/// Hex-encoded SHA-256 of `input`
pub fn sha256_hex(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

/// A random 64-character hex hash
pub fn random_hash() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// A 64-character hex hash starting with `prefix`
pub fn hash_with_prefix(prefix: &str) -> String {
    let mut hash = random_hash();
    hash.replace_range(..prefix.len(), prefix);
    hash
}

/// Hashes derived from one credential the way a validator computes them
pub struct CredentialHashes {
    pub uci: String,
    pub country_uci: String,
    pub signature: String,
}

impl CredentialHashes {
    pub fn derive(country: &str, uci: &str, signature: &[u8]) -> Self {
        Self {
            uci: sha256_hex(uci.as_bytes()),
            country_uci: sha256_hex(format!("{}{}", country, uci).as_bytes()),
            signature: sha256_hex(signature),
        }
    }
}

/// A Bloom filter slice containing `revoked` (hex hashes)
pub fn bloom_slice(revoked: &[&str], target_fpr: f64) -> ChunkSlice {
    let mut filter = BloomFilter::new_with_fpr(revoked.len().max(1), target_fpr);
    for hash in revoked {
        filter.insert(&decode(hash));
    }
    ChunkSlice::bloom_filter(filter.to_bytes())
}

/// A partial hash list slice holding `entry_len`-byte prefixes of `revoked`
pub fn hash_list_slice(revoked: &[&str], entry_len: usize) -> ChunkSlice {
    let decoded: Vec<Vec<u8>> = revoked.iter().map(|h| decode(h)).collect();
    let filter = PartialVariableHashFilter::from_hashes(entry_len, decoded.iter().map(Vec::as_slice))
        .expect("valid entry length");
    ChunkSlice::hash_list(filter.to_bytes())
}

/// Partition holding `hash` under `mode`
pub fn partition_of(mode: RevocationMode, hash: &str) -> Coordinates {
    coordinates_for(mode, hash).expect("addressable hash")
}

fn decode(hash: &str) -> Vec<u8> {
    hex::decode(hash).expect("hex hash")
}
