//! Revocation Service
//!
//! The decision engine: resolves KID metadata, addresses the partition of
//! each applicable candidate hash, fetches its slices and probes them.
//!
//! A Bloom filter positive is accepted as a revocation. Bloom filters can
//! report false positives, so a valid credential may occasionally be
//! reported as revoked; the data producer bounds that rate when sizing the
//! slices and the protocol accepts it.

use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::adapters::{DccFilterDecoder, SystemClock};
use crate::domain::{
    coordinates_for, CandidateHashes, CheckStrategy, Coordinates, HashType, KidMetadata,
    RevocationConfig, RevocationMode, SliceType, ValidationData,
};
use crate::error::{DataError, DecodeError, RevocationError};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::{
    Clock, FilterDecoder, RevocationApi, RevocationCheck, RevocationRepository,
};

/// Revocation Service implementation
///
/// Implements the `RevocationApi` port using injected dependencies. Holds
/// no per-lookup state, so one instance can serve concurrent lookups.
pub struct RevocationService<R, D = DccFilterDecoder, C = SystemClock>
where
    R: RevocationRepository,
    D: FilterDecoder,
    C: Clock,
{
    /// Revocation data repository (driven port)
    repository: Arc<R>,
    /// Slice decoder (driven port)
    decoder: D,
    /// Freshness timestamp source (driven port)
    clock: C,
    config: RevocationConfig,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<R: RevocationRepository> RevocationService<R> {
    /// Create a service with the default decoder, system clock and config
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            decoder: DccFilterDecoder,
            clock: SystemClock,
            config: RevocationConfig::default(),
            metrics: Arc::new(NoOpMetrics),
        }
    }
}

impl<R, D, C> RevocationService<R, D, C>
where
    R: RevocationRepository,
    D: FilterDecoder,
    C: Clock,
{
    /// Replace the configuration after validating it
    pub fn with_config(mut self, config: RevocationConfig) -> Result<Self, RevocationError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Replace the slice decoder
    pub fn with_decoder<D2: FilterDecoder>(self, decoder: D2) -> RevocationService<R, D2, C> {
        RevocationService {
            repository: self.repository,
            decoder,
            clock: self.clock,
            config: self.config,
            metrics: self.metrics,
        }
    }

    /// Replace the clock
    pub fn with_clock<C2: Clock>(self, clock: C2) -> RevocationService<R, D, C2> {
        RevocationService {
            repository: self.repository,
            decoder: self.decoder,
            clock,
            config: self.config,
            metrics: self.metrics,
        }
    }

    /// Attach a metrics recorder
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &RevocationConfig {
        &self.config
    }

    async fn evaluate(
        &self,
        kid: &str,
        hashes: &CandidateHashes,
    ) -> Result<RevocationCheck, RevocationError> {
        let Some(metadata) = self.repository.get_metadata_by_kid(kid).await? else {
            debug!(kid = kid, "KID not tracked, skipping revocation check");
            return Ok(RevocationCheck::not_revoked());
        };

        match self.config.strategy {
            CheckStrategy::Sequential => self.evaluate_sequential(kid, &metadata, hashes).await,
            CheckStrategy::Concurrent => self.evaluate_concurrent(kid, &metadata, hashes).await,
        }
    }

    /// Enabled kinds that have a candidate hash, in evaluation order
    fn applicable<'a>(
        metadata: &'a KidMetadata,
        hashes: &'a CandidateHashes,
    ) -> impl Iterator<Item = (HashType, &'a str)> + 'a {
        metadata
            .enabled_hash_types()
            .filter_map(move |hash_type| match hashes.get(hash_type) {
                Some(hash) => Some((hash_type, hash)),
                None => {
                    debug!(hash_type = %hash_type, "No candidate hash, skipping");
                    None
                }
            })
    }

    async fn evaluate_sequential(
        &self,
        kid: &str,
        metadata: &KidMetadata,
        hashes: &CandidateHashes,
    ) -> Result<RevocationCheck, RevocationError> {
        for (hash_type, hash) in Self::applicable(metadata, hashes) {
            if let Some(slice_type) = self
                .check_hash_type(kid, metadata.mode, hash_type, hash)
                .await?
            {
                return Ok(RevocationCheck::revoked_by(hash_type, slice_type));
            }
        }
        Ok(RevocationCheck::not_revoked())
    }

    /// Poll all applicable kinds together. Returning drops the remaining
    /// futures, which cancels their in-flight fetches. A positive from any
    /// kind wins over another kind's failure.
    async fn evaluate_concurrent(
        &self,
        kid: &str,
        metadata: &KidMetadata,
        hashes: &CandidateHashes,
    ) -> Result<RevocationCheck, RevocationError> {
        let mode = metadata.mode;
        let mut pending: FuturesUnordered<_> = Self::applicable(metadata, hashes)
            .map(move |(hash_type, hash)| async move {
                (hash_type, self.check_hash_type(kid, mode, hash_type, hash).await)
            })
            .collect();

        let mut first_error = None;
        while let Some((hash_type, result)) = pending.next().await {
            match result {
                Ok(Some(slice_type)) => {
                    return Ok(RevocationCheck::revoked_by(hash_type, slice_type));
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(hash_type = %hash_type, error = %e, "Hash kind check failed");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(RevocationCheck::not_revoked()),
        }
    }

    /// Check one hash kind. `Ok(None)` means not revoked for this kind.
    async fn check_hash_type(
        &self,
        kid: &str,
        mode: RevocationMode,
        hash_type: HashType,
        hash: &str,
    ) -> Result<Option<SliceType>, RevocationError> {
        debug!(hash_type = %hash_type, hash = hash, "Checking candidate hash");

        let Some(coordinates) = coordinates_for(mode, hash) else {
            debug!(
                hash_type = %hash_type,
                mode = ?mode,
                hash_len = hash.len(),
                "Partition not addressable, skipping"
            );
            return Ok(None);
        };
        debug!(mode = ?mode, %coordinates, "Computed partition coordinates");

        let candidate = match hex::decode(hash) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(hash_type = %hash_type, error = %e, "Candidate hash is not hex, skipping");
                return Ok(None);
            }
        };

        let data = self.validation_data(kid, coordinates).await?;
        let matched = self.contains(hash_type, &candidate, &data)?;
        if let Some(slice_type) = matched {
            info!(hash_type = %hash_type, slice_type = ?slice_type, hash = hash, "Credential revoked");
        }
        Ok(matched)
    }

    async fn validation_data(
        &self,
        kid: &str,
        coordinates: Coordinates,
    ) -> Result<ValidationData, RevocationError> {
        let as_of_micros = self.clock.now_micros();
        let slices = self
            .repository
            .get_chunk_slices(kid, coordinates, as_of_micros)
            .await?;

        if slices.len() > self.config.max_slices_per_partition {
            return Err(DataError::TooManySlices {
                count: slices.len(),
                max: self.config.max_slices_per_partition,
            }
            .into());
        }
        self.metrics.record_slices_fetched(slices.len());

        let data = ValidationData::from_slices(coordinates, slices);
        debug!(
            %coordinates,
            bloom_filters = data.bloom_filters.len(),
            hash_lists = data.hash_lists.len(),
            ignored = data.ignored,
            "Slices fetched"
        );
        Ok(data)
    }

    /// Probe Bloom filter slices, then hash list slices. Stops at the first
    /// positive and reports which slice type produced it.
    fn contains(
        &self,
        hash_type: HashType,
        candidate: &[u8],
        data: &ValidationData,
    ) -> Result<Option<SliceType>, RevocationError> {
        let decode_error = |source: DecodeError| RevocationError::Decode { hash_type, source };

        for content in &data.bloom_filters {
            self.check_size(content).map_err(decode_error)?;
            let filter = self
                .decoder
                .decode_bloom_filter(content)
                .map_err(decode_error)?;
            self.metrics.record_probe(SliceType::BloomFilter);
            if filter.might_contain(candidate) {
                return Ok(Some(SliceType::BloomFilter));
            }
        }

        for content in &data.hash_lists {
            self.check_size(content).map_err(decode_error)?;
            let filter = self
                .decoder
                .decode_hash_list(content)
                .map_err(decode_error)?;
            self.metrics.record_probe(SliceType::VarHashList);
            if filter.might_contain(candidate) {
                return Ok(Some(SliceType::VarHashList));
            }
        }

        Ok(None)
    }

    fn check_size(&self, content: &[u8]) -> Result<(), DecodeError> {
        if content.len() > self.config.max_slice_bytes {
            return Err(DecodeError::SliceTooLarge {
                size: content.len(),
                max: self.config.max_slice_bytes,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<R, D, C> RevocationApi for RevocationService<R, D, C>
where
    R: RevocationRepository + 'static,
    D: FilterDecoder + 'static,
    C: Clock + 'static,
{
    async fn check(
        &self,
        kid: &str,
        hashes: &CandidateHashes,
    ) -> Result<RevocationCheck, RevocationError> {
        let start = Instant::now();
        debug!(kid = kid, "Revocation check start");

        let result = self.evaluate(kid, hashes).await;
        match &result {
            Ok(check) => {
                self.metrics.record_check(start.elapsed(), check.revoked);
                info!(
                    kid = kid,
                    revoked = check.revoked,
                    matched = ?check.matched,
                    "Revocation check end"
                );
            }
            Err(e) => {
                self.metrics.record_failure(start.elapsed());
                warn!(kid = kid, error = %e, "Revocation check failed");
            }
        }
        result
    }
}
