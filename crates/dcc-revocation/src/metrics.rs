//! Metrics hooks for revocation checks
//!
//! Counters for lookups, verdicts, slices fetched and filter probes.
//!
//! ## Usage
//!
//! ```ignore
//! use dcc_revocation::metrics::Metrics;
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(Metrics::new());
//! let service = RevocationService::new(repository).with_metrics(metrics.clone());
//!
//! service.is_revoked(kid, &hashes).await?;
//! println!("{:?}", metrics.snapshot());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::SliceType;

/// Metrics collector for revocation checks
#[derive(Default)]
pub struct Metrics {
    /// Total checks performed
    pub checks_performed: AtomicU64,
    /// Checks that reported a revocation
    pub checks_revoked: AtomicU64,
    /// Checks that failed with an error
    pub checks_failed: AtomicU64,
    /// Slices fetched from the repository
    pub slices_fetched: AtomicU64,
    /// Bloom filter membership probes
    pub bloom_probes: AtomicU64,
    /// Hash list membership probes
    pub hash_list_probes: AtomicU64,
    /// Cumulative check time in nanoseconds
    pub check_time_ns: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed check
    pub fn record_check(&self, duration: Duration, revoked: bool) {
        self.checks_performed.fetch_add(1, Ordering::Relaxed);
        self.check_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if revoked {
            self.checks_revoked.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a check that failed
    pub fn record_failure(&self, duration: Duration) {
        self.checks_performed.fetch_add(1, Ordering::Relaxed);
        self.checks_failed.fetch_add(1, Ordering::Relaxed);
        self.check_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record slices returned for one partition
    pub fn record_slices_fetched(&self, count: usize) {
        self.slices_fetched
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record one membership probe
    pub fn record_probe(&self, slice_type: SliceType) {
        match slice_type {
            SliceType::BloomFilter => {
                self.bloom_probes.fetch_add(1, Ordering::Relaxed);
            }
            SliceType::VarHashList => {
                self.hash_list_probes.fetch_add(1, Ordering::Relaxed);
            }
            SliceType::Unknown => {}
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            checks_performed: self.checks_performed.load(Ordering::Relaxed),
            checks_revoked: self.checks_revoked.load(Ordering::Relaxed),
            checks_failed: self.checks_failed.load(Ordering::Relaxed),
            slices_fetched: self.slices_fetched.load(Ordering::Relaxed),
            bloom_probes: self.bloom_probes.load(Ordering::Relaxed),
            hash_list_probes: self.hash_list_probes.load(Ordering::Relaxed),
            avg_check_ns: self.avg_check_time_ns(),
        }
    }

    /// Calculate average check time in nanoseconds
    pub fn avg_check_time_ns(&self) -> u64 {
        let total = self.check_time_ns.load(Ordering::Relaxed);
        let count = self.checks_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.checks_performed.store(0, Ordering::Relaxed);
        self.checks_revoked.store(0, Ordering::Relaxed);
        self.checks_failed.store(0, Ordering::Relaxed);
        self.slices_fetched.store(0, Ordering::Relaxed);
        self.bloom_probes.store(0, Ordering::Relaxed);
        self.hash_list_probes.store(0, Ordering::Relaxed);
        self.check_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub checks_performed: u64,
    pub checks_revoked: u64,
    pub checks_failed: u64,
    pub slices_fetched: u64,
    pub bloom_probes: u64,
    pub hash_list_probes: u64,
    pub avg_check_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to integrate with external metrics systems
/// like Prometheus, StatsD, or OpenTelemetry.
pub trait MetricsRecorder: Send + Sync {
    fn record_check(&self, duration: Duration, revoked: bool);

    fn record_failure(&self, duration: Duration);

    fn record_slices_fetched(&self, count: usize);

    fn record_probe(&self, slice_type: SliceType);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_check(&self, _: Duration, _: bool) {}
    fn record_failure(&self, _: Duration) {}
    fn record_slices_fetched(&self, _: usize) {}
    fn record_probe(&self, _: SliceType) {}
}

impl MetricsRecorder for Metrics {
    fn record_check(&self, duration: Duration, revoked: bool) {
        Metrics::record_check(self, duration, revoked);
    }

    fn record_failure(&self, duration: Duration) {
        Metrics::record_failure(self, duration);
    }

    fn record_slices_fetched(&self, count: usize) {
        Metrics::record_slices_fetched(self, count);
    }

    fn record_probe(&self, slice_type: SliceType) {
        Metrics::record_probe(self, slice_type);
    }
}
