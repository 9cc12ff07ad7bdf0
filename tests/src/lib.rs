//! # DCC Revocation Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Lookup path benchmarks
//! └── src/
//!     ├── fixtures.rs   # Real encoded slices and credential hashes
//!     └── integration/  # End-to-end revocation scenarios
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dcc-revocation-tests
//! cargo bench -p dcc-revocation-tests
//! ```

pub mod fixtures;
