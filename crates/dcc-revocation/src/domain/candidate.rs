//! Candidate hashes of a single credential

use serde::{Deserialize, Serialize};

use super::metadata::HashType;

/// Hex-encoded SHA-256 digests derived from one credential.
///
/// Any hash may be absent when it cannot be computed for the credential;
/// the corresponding kind is then skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateHashes {
    #[serde(default)]
    pub uci_hash: Option<String>,
    #[serde(default)]
    pub country_uci_hash: Option<String>,
    #[serde(default)]
    pub signature_hash: Option<String>,
}

impl CandidateHashes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_uci(mut self, hash: impl Into<String>) -> Self {
        self.uci_hash = Some(hash.into());
        self
    }

    pub fn with_country_uci(mut self, hash: impl Into<String>) -> Self {
        self.country_uci_hash = Some(hash.into());
        self
    }

    pub fn with_signature(mut self, hash: impl Into<String>) -> Self {
        self.signature_hash = Some(hash.into());
        self
    }

    /// Candidate hash for a given kind, if present
    pub fn get(&self, hash_type: HashType) -> Option<&str> {
        match hash_type {
            HashType::Uci => self.uci_hash.as_deref(),
            HashType::CountryCodeUci => self.country_uci_hash.as_deref(),
            HashType::Signature => self.signature_hash.as_deref(),
        }
    }
}
