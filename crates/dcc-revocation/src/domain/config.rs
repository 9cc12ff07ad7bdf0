//! Revocation engine configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use dcc_revocation::domain::{CheckStrategy, RevocationConfigBuilder};
//!
//! let config = RevocationConfigBuilder::new()
//!     .strategy(CheckStrategy::Concurrent)
//!     .max_slice_bytes(1 << 20)
//!     .build()
//!     .expect("Valid config");
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::warn;

use crate::error::RevocationError;

/// Default upper bound on a single slice payload (4 MiB)
pub const DEFAULT_MAX_SLICE_BYTES: usize = 4 * 1024 * 1024;

/// Default upper bound on slices returned for one partition
pub const DEFAULT_MAX_SLICES_PER_PARTITION: usize = 1024;

/// How the per-hash-kind checks of one lookup are scheduled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStrategy {
    /// One kind after another in declared order; first positive returns
    #[default]
    Sequential,
    /// All applicable kinds polled together; first positive cancels the rest
    Concurrent,
}

impl FromStr for CheckStrategy {
    type Err = RevocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(CheckStrategy::Sequential),
            "concurrent" => Ok(CheckStrategy::Concurrent),
            other => Err(RevocationError::InvalidConfig(format!(
                "unknown check strategy: {}",
                other
            ))),
        }
    }
}

/// Revocation engine configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationConfig {
    /// Scheduling of per-kind checks
    pub strategy: CheckStrategy,
    /// Largest slice payload accepted for decoding
    pub max_slice_bytes: usize,
    /// Most slices accepted for a single partition
    pub max_slices_per_partition: usize,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            strategy: CheckStrategy::Sequential,
            max_slice_bytes: DEFAULT_MAX_SLICE_BYTES,
            max_slices_per_partition: DEFAULT_MAX_SLICES_PER_PARTITION,
        }
    }
}

impl RevocationConfig {
    /// Validate configuration bounds
    pub fn validate(&self) -> Result<(), RevocationError> {
        if self.max_slice_bytes == 0 {
            return Err(RevocationError::InvalidConfig(
                "max_slice_bytes cannot be 0".to_string(),
            ));
        }

        if self.max_slices_per_partition == 0 {
            return Err(RevocationError::InvalidConfig(
                "max_slices_per_partition cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DCC_REVOCATION_STRATEGY`: `sequential` or `concurrent` (default: sequential)
    /// - `DCC_REVOCATION_MAX_SLICE_BYTES`: largest slice payload (default: 4 MiB)
    /// - `DCC_REVOCATION_MAX_SLICES`: most slices per partition (default: 1024)
    ///
    /// Unparsable or invalid values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            strategy: env_or("DCC_REVOCATION_STRATEGY", defaults.strategy),
            max_slice_bytes: env_or("DCC_REVOCATION_MAX_SLICE_BYTES", defaults.max_slice_bytes),
            max_slices_per_partition: env_or(
                "DCC_REVOCATION_MAX_SLICES",
                defaults.max_slices_per_partition,
            ),
        };

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!(error = %e, "Invalid revocation config from environment, using defaults");
                defaults
            }
        }
    }

    /// Builder-style method to set the check strategy
    pub fn with_strategy(mut self, strategy: CheckStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key = key, value = %raw, "Ignoring unparsable environment value");
            default
        }),
        Err(_) => default,
    }
}

/// Builder for RevocationConfig with validation
#[derive(Default)]
pub struct RevocationConfigBuilder {
    strategy: Option<CheckStrategy>,
    max_slice_bytes: Option<usize>,
    max_slices_per_partition: Option<usize>,
}

impl RevocationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(mut self, strategy: CheckStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn max_slice_bytes(mut self, bytes: usize) -> Self {
        self.max_slice_bytes = Some(bytes);
        self
    }

    pub fn max_slices_per_partition(mut self, slices: usize) -> Self {
        self.max_slices_per_partition = Some(slices);
        self
    }

    /// Build the RevocationConfig, validating all parameters
    pub fn build(self) -> Result<RevocationConfig, RevocationError> {
        let defaults = RevocationConfig::default();

        let config = RevocationConfig {
            strategy: self.strategy.unwrap_or(defaults.strategy),
            max_slice_bytes: self.max_slice_bytes.unwrap_or(defaults.max_slice_bytes),
            max_slices_per_partition: self
                .max_slices_per_partition
                .unwrap_or(defaults.max_slices_per_partition),
        };

        config.validate()?;
        Ok(config)
    }
}
