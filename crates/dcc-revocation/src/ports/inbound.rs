//! Inbound Ports (Driving Ports)
//!
//! The API a credential validator uses to ask whether a credential has
//! been revoked.

use async_trait::async_trait;

use crate::domain::{CandidateHashes, HashType, SliceType};
use crate::error::RevocationError;

/// Which hash kind and filter type produced a revocation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevocationMatch {
    pub hash_type: HashType,
    pub slice_type: SliceType,
}

/// Outcome of a revocation check
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevocationCheck {
    /// Whether the credential is revoked
    pub revoked: bool,
    /// What matched (if anything)
    pub matched: Option<RevocationMatch>,
}

impl RevocationCheck {
    pub fn not_revoked() -> Self {
        Self::default()
    }

    pub fn revoked_by(hash_type: HashType, slice_type: SliceType) -> Self {
        Self {
            revoked: true,
            matched: Some(RevocationMatch {
                hash_type,
                slice_type,
            }),
        }
    }
}

/// Primary revocation API (Driving Port)
#[async_trait]
pub trait RevocationApi: Send + Sync {
    /// Check a credential and report what matched
    ///
    /// Kinds are evaluated in order UCI, COUNTRYCODEUCI, SIGNATURE. A kind
    /// is skipped if it is not enabled for the KID, its hash is absent or
    /// malformed, or the KID's mode cannot address it.
    ///
    /// # Errors
    /// Repository and slice decoding failures. These are never reported
    /// as "not revoked".
    async fn check(
        &self,
        kid: &str,
        hashes: &CandidateHashes,
    ) -> Result<RevocationCheck, RevocationError>;

    /// Whether the credential is revoked
    async fn is_revoked(
        &self,
        kid: &str,
        hashes: &CandidateHashes,
    ) -> Result<bool, RevocationError> {
        Ok(self.check(kid, hashes).await?.revoked)
    }
}
