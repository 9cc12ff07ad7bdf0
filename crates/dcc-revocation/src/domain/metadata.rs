//! Per-KID revocation metadata
//!
//! Describes which hash kinds an issuer key publishes revocations for and
//! how its revocation data is partitioned.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of credential hash a revocation list may be keyed on.
///
/// Ordering follows declaration order, which is also the order in which
/// the engine evaluates kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HashType {
    /// SHA-256 of the unique certificate identifier
    Uci,
    /// SHA-256 of issuing country code concatenated with the UCI
    #[serde(rename = "COUNTRYCODEUCI")]
    CountryCodeUci,
    /// SHA-256 of the credential signature
    Signature,
}

impl HashType {
    /// All hash kinds in evaluation order
    pub const ALL: [HashType; 3] = [HashType::Uci, HashType::CountryCodeUci, HashType::Signature];

    pub fn as_str(&self) -> &'static str {
        match self {
            HashType::Uci => "UCI",
            HashType::CountryCodeUci => "COUNTRYCODEUCI",
            HashType::Signature => "SIGNATURE",
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partitioning scheme of a KID's revocation data
///
/// Each mode adds one hex-character dimension to the shard address:
/// 16, 256 or 4096 partitions respectively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevocationMode {
    /// One coordinate character (`cid`)
    Point,
    /// Two coordinate characters (`x`, `cid`)
    Vector,
    /// Three coordinate characters (`x`, `y`, `cid`)
    Coordinate,
    /// No valid addressing; lookups for this KID never match
    #[default]
    #[serde(other)]
    Unknown,
}

impl RevocationMode {
    /// Number of leading hash characters consumed by this mode
    pub fn arity(&self) -> usize {
        match self {
            RevocationMode::Point => 1,
            RevocationMode::Vector => 2,
            RevocationMode::Coordinate => 3,
            RevocationMode::Unknown => 0,
        }
    }
}

/// Revocation configuration published for a single issuer key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KidMetadata {
    /// Enabled hash kinds
    pub hash_types: BTreeSet<HashType>,
    /// Partitioning scheme
    pub mode: RevocationMode,
}

impl KidMetadata {
    pub fn new(hash_types: impl IntoIterator<Item = HashType>, mode: RevocationMode) -> Self {
        Self {
            hash_types: hash_types.into_iter().collect(),
            mode,
        }
    }

    /// Whether revocations are published for this hash kind
    pub fn is_enabled(&self, hash_type: HashType) -> bool {
        self.hash_types.contains(&hash_type)
    }

    /// Enabled hash kinds in evaluation order
    pub fn enabled_hash_types(&self) -> impl Iterator<Item = HashType> + '_ {
        HashType::ALL.into_iter().filter(|t| self.is_enabled(*t))
    }
}
