//! # dcc-revocation-check
//!
//! Evaluates one revocation query against a JSON fixture.
//!
//! ```text
//! dcc-revocation-check <fixture.json>
//! ```
//!
//! Fixture layout:
//!
//! ```json
//! {
//!   "metadata": { "abc": { "hash_types": ["UCI"], "mode": "POINT" } },
//!   "partitions": [
//!     { "kid": "abc", "coordinates": { "x": null, "y": null, "cid": "f" },
//!       "slices": [ { "type": "VARHASHLIST", "content": "0200000000" } ] }
//!   ],
//!   "query": { "kid": "abc", "hashes": { "uci_hash": "f0aa11" } }
//! }
//! ```
//!
//! Configuration is read from `DCC_REVOCATION_*` environment variables and
//! log verbosity from `RUST_LOG` (default: info). Exits non-zero if the
//! check cannot complete.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dcc_revocation::{
    CandidateHashes, ChunkSlice, Coordinates, InMemoryRevocationRepository, KidMetadata, Metrics,
    RevocationApi, RevocationConfig, RevocationService,
};

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    metadata: HashMap<String, KidMetadata>,
    #[serde(default)]
    partitions: Vec<Partition>,
    query: Query,
}

#[derive(Debug, Deserialize)]
struct Partition {
    kid: String,
    coordinates: Coordinates,
    slices: Vec<ChunkSlice>,
}

#[derive(Debug, Deserialize)]
struct Query {
    kid: String,
    hashes: CandidateHashes,
}

fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow!("invalid log filter: {}", e))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

async fn load_repository(fixture: &Fixture) -> Arc<InMemoryRevocationRepository> {
    let repository = Arc::new(InMemoryRevocationRepository::new());
    for (kid, metadata) in &fixture.metadata {
        repository.put_metadata(kid.clone(), metadata.clone()).await;
    }
    for partition in &fixture.partitions {
        for slice in &partition.slices {
            repository
                .add_slice(partition.kid.clone(), partition.coordinates, slice.clone())
                .await;
        }
    }
    repository
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let path = std::env::args()
        .nth(1)
        .context("usage: dcc-revocation-check <fixture.json>")?;
    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let fixture: Fixture =
        serde_json::from_str(&raw).with_context(|| format!("parsing fixture {}", path))?;

    info!(
        path = %path,
        kids = fixture.metadata.len(),
        partitions = fixture.partitions.len(),
        "Loaded revocation fixture"
    );

    let repository = load_repository(&fixture).await;
    let metrics = Arc::new(Metrics::new());
    let service = RevocationService::new(repository)
        .with_config(RevocationConfig::from_env())?
        .with_metrics(metrics.clone());

    let check = service
        .check(&fixture.query.kid, &fixture.query.hashes)
        .await
        .context("revocation check did not complete")?;

    match check.matched {
        Some(matched) => println!(
            "revoked ({} matched a {:?} slice)",
            matched.hash_type, matched.slice_type
        ),
        None => println!("not revoked"),
    }
    debug!(metrics = ?metrics.snapshot(), "Check metrics");

    Ok(())
}
