//! Partition addressing
//!
//! The leading hex characters of a candidate hash form a radix-16 prefix
//! tree over the hash space. Depending on the KID's mode, one to three of
//! them select the remote shard holding the relevant slices:
//!
//! | mode       | x         | y         | cid       |
//! |------------|-----------|-----------|-----------|
//! | POINT      | -         | -         | `hash[0]` |
//! | VECTOR     | `hash[0]` | -         | `hash[1]` |
//! | COORDINATE | `hash[0]` | `hash[1]` | `hash[2]` |

use serde::{Deserialize, Serialize};
use std::fmt;

use super::metadata::RevocationMode;

/// Shard address of a revocation partition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: Option<char>,
    pub y: Option<char>,
    pub cid: char,
}

impl Coordinates {
    pub fn point(cid: char) -> Self {
        Self { x: None, y: None, cid }
    }

    pub fn vector(x: char, cid: char) -> Self {
        Self { x: Some(x), y: None, cid }
    }

    pub fn coordinate(x: char, y: char, cid: char) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            cid,
        }
    }

    /// Number of characters making up this address
    pub fn arity(&self) -> usize {
        1 + usize::from(self.x.is_some()) + usize::from(self.y.is_some())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.x, self.y) {
            (Some(x), Some(y)) => write!(f, "{x}/{y}/{}", self.cid),
            (Some(x), None) => write!(f, "{x}/{}", self.cid),
            _ => write!(f, "{}", self.cid),
        }
    }
}

/// Compute the partition coordinates of `hash` under `mode`.
///
/// Returns `None` when the mode is `Unknown` or the hash has fewer
/// characters than the mode consumes. Callers treat `None` as
/// "not revoked" for that hash kind.
pub fn coordinates_for(mode: RevocationMode, hash: &str) -> Option<Coordinates> {
    let mut chars = hash.chars();
    let coordinates = match mode {
        RevocationMode::Point => Coordinates::point(chars.next()?),
        RevocationMode::Vector => {
            let x = chars.next()?;
            Coordinates::vector(x, chars.next()?)
        }
        RevocationMode::Coordinate => {
            let x = chars.next()?;
            let y = chars.next()?;
            Coordinates::coordinate(x, y, chars.next()?)
        }
        RevocationMode::Unknown => return None,
    };
    debug_assert_eq!(coordinates.arity(), mode.arity());
    Some(coordinates)
}
