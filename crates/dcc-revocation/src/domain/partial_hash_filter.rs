//! Partial variable hash list slices
//!
//! An exact filter holding fixed-length prefixes of revoked hashes. The
//! producer chooses the prefix length per slice so prefixes stay unique
//! within the partition; entries it prunes are published in Bloom filter
//! slices instead.
//!
//! Payload layout:
//!
//! ```text
//! u8   entry length L   (1..=32)
//! u32  entry count N    (big-endian)
//! N*L  entries
//! ```

use std::collections::HashSet;

use super::filter::MembershipFilter;
use super::wire::SliceReader;
use crate::error::DecodeError;

/// Length of a full SHA-256 digest
pub const MAX_ENTRY_LEN: usize = 32;

/// Exact membership set of hash prefixes
#[derive(Clone, Debug, Default)]
pub struct PartialVariableHashFilter {
    entry_len: usize,
    entries: HashSet<Vec<u8>>,
}

impl PartialVariableHashFilter {
    /// Build a filter holding the first `entry_len` bytes of each hash
    pub fn from_hashes<'a>(
        entry_len: usize,
        hashes: impl IntoIterator<Item = &'a [u8]>,
    ) -> Result<Self, DecodeError> {
        validate_entry_len(entry_len)?;
        let mut entries = HashSet::new();
        for hash in hashes {
            if hash.len() < entry_len {
                return Err(DecodeError::InvalidParameters(format!(
                    "hash of {} bytes shorter than entry length {}",
                    hash.len(),
                    entry_len
                )));
            }
            entries.insert(hash[..entry_len].to_vec());
        }
        Ok(Self { entry_len, entries })
    }

    /// Decode a filter from slice content
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = SliceReader::new(bytes);

        let entry_len = reader.read_u8()? as usize;
        validate_entry_len(entry_len)?;

        let count = reader.read_u32()? as usize;
        let expected = count.saturating_mul(entry_len);
        if reader.remaining() < expected {
            return Err(DecodeError::Truncated {
                needed: expected - reader.remaining(),
            });
        }

        let mut entries = HashSet::with_capacity(count);
        for _ in 0..count {
            entries.insert(reader.take(entry_len)?.to_vec());
        }
        reader.finish()?;

        Ok(Self { entry_len, entries })
    }

    /// Encode as slice content; entries are written in sorted order
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut sorted: Vec<&Vec<u8>> = self.entries.iter().collect();
        sorted.sort();

        let mut out = Vec::with_capacity(5 + sorted.len() * self.entry_len);
        out.push(self.entry_len as u8);
        out.extend_from_slice(&(sorted.len() as u32).to_be_bytes());
        for entry in sorted {
            out.extend_from_slice(entry);
        }
        out
    }

    pub fn entry_len(&self) -> usize {
        self.entry_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_entry_len(entry_len: usize) -> Result<(), DecodeError> {
    if entry_len == 0 || entry_len > MAX_ENTRY_LEN {
        return Err(DecodeError::InvalidParameters(format!(
            "entry length {} outside 1..={}",
            entry_len, MAX_ENTRY_LEN
        )));
    }
    Ok(())
}

impl MembershipFilter for PartialVariableHashFilter {
    fn might_contain(&self, candidate: &[u8]) -> bool {
        candidate.len() >= self.entry_len && self.entries.contains(&candidate[..self.entry_len])
    }
}
