//! In-memory revocation repository
//!
//! Holds KID metadata and partition slices in process memory. Used by the
//! CLI to evaluate fixtures and by tests to observe what the engine
//! requested.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{ChunkSlice, Coordinates, KidMetadata};
use crate::error::DataError;
use crate::ports::RevocationRepository;

/// A slice request observed by the repository
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliceRequest {
    pub kid: String,
    pub coordinates: Coordinates,
    pub as_of_micros: i64,
}

/// Repository backed by in-process maps
#[derive(Default)]
pub struct InMemoryRevocationRepository {
    metadata: RwLock<HashMap<String, KidMetadata>>,
    slices: RwLock<HashMap<(String, Coordinates), Vec<ChunkSlice>>>,
    requests: RwLock<Vec<SliceRequest>>,
    failure: RwLock<Option<String>>,
    metadata_calls: AtomicUsize,
    slice_calls: AtomicUsize,
}

impl InMemoryRevocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the metadata of a KID
    pub async fn put_metadata(&self, kid: impl Into<String>, metadata: KidMetadata) {
        self.metadata.write().await.insert(kid.into(), metadata);
    }

    /// Add a slice to the partition at `coordinates`
    pub async fn add_slice(&self, kid: impl Into<String>, coordinates: Coordinates, slice: ChunkSlice) {
        self.slices
            .write()
            .await
            .entry((kid.into(), coordinates))
            .or_default()
            .push(slice);
    }

    /// Make every subsequent call fail with a connection error
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().await = Some(message.into());
    }

    /// Stop failing calls
    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    /// Number of metadata lookups served
    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    /// Number of slice fetches served
    pub fn slice_calls(&self) -> usize {
        self.slice_calls.load(Ordering::SeqCst)
    }

    /// Slice requests in the order they were received
    pub async fn requests(&self) -> Vec<SliceRequest> {
        self.requests.read().await.clone()
    }

    async fn check_available(&self) -> Result<(), DataError> {
        match self.failure.read().await.as_ref() {
            Some(message) => Err(DataError::ConnectionError(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RevocationRepository for InMemoryRevocationRepository {
    async fn get_metadata_by_kid(&self, kid: &str) -> Result<Option<KidMetadata>, DataError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available().await?;
        Ok(self.metadata.read().await.get(kid).cloned())
    }

    async fn get_chunk_slices(
        &self,
        kid: &str,
        coordinates: Coordinates,
        as_of_micros: i64,
    ) -> Result<Vec<ChunkSlice>, DataError> {
        self.slice_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.write().await.push(SliceRequest {
            kid: kid.to_string(),
            coordinates,
            as_of_micros,
        });
        self.check_available().await?;

        let slices = self
            .slices
            .read()
            .await
            .get(&(kid.to_string(), coordinates))
            .cloned()
            .unwrap_or_default();
        debug!(kid = kid, %coordinates, count = slices.len(), "Serving slices from memory");
        Ok(slices)
    }
}
