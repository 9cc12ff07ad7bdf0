//! Revocation data slices and the per-query working set

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::addressing::Coordinates;

/// Encoding of a slice payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SliceType {
    /// Probabilistic filter, no false negatives
    #[serde(rename = "BLOOMFILTER")]
    BloomFilter,
    /// Exact list of (partial) hashes
    #[serde(rename = "VARHASHLIST")]
    VarHashList,
    /// Published by a newer producer; ignored
    #[serde(other)]
    Unknown,
}

/// One downloadable unit of revocation data for a partition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSlice {
    #[serde(rename = "type")]
    pub slice_type: SliceType,
    #[serde(with = "hex_content")]
    pub content: Vec<u8>,
}

/// Serde support for hex-encoded slice content
mod hex_content {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(content: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(content))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        hex::decode(encoded).map_err(serde::de::Error::custom)
    }
}

impl ChunkSlice {
    pub fn new(slice_type: SliceType, content: Vec<u8>) -> Self {
        Self {
            slice_type,
            content,
        }
    }

    pub fn bloom_filter(content: Vec<u8>) -> Self {
        Self::new(SliceType::BloomFilter, content)
    }

    pub fn hash_list(content: Vec<u8>) -> Self {
        Self::new(SliceType::VarHashList, content)
    }
}

/// Slices applicable to one partition, split by type.
///
/// Each collection is a set keyed on the raw payload bytes, so a slice
/// delivered twice is only evaluated once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationData {
    /// Partition the slices were fetched for
    pub coordinates: Coordinates,
    pub bloom_filters: BTreeSet<Vec<u8>>,
    pub hash_lists: BTreeSet<Vec<u8>>,
    /// Slices of unrecognised type that were skipped
    pub ignored: usize,
}

impl ValidationData {
    pub fn from_slices(coordinates: Coordinates, slices: Vec<ChunkSlice>) -> Self {
        let mut data = Self {
            coordinates,
            bloom_filters: BTreeSet::new(),
            hash_lists: BTreeSet::new(),
            ignored: 0,
        };
        for slice in slices {
            match slice.slice_type {
                SliceType::BloomFilter => {
                    data.bloom_filters.insert(slice.content);
                }
                SliceType::VarHashList => {
                    data.hash_lists.insert(slice.content);
                }
                SliceType::Unknown => data.ignored += 1,
            }
        }
        data
    }

    pub fn is_empty(&self) -> bool {
        self.bloom_filters.is_empty() && self.hash_lists.is_empty()
    }
}
