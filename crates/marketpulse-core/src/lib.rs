//! marketpulse core: runtime-free domain types for the marketplace dashboard.
//!
//! This crate owns the metrics snapshot and its increment rule, the static
//! agent catalog, the search stub, and the dashboard datasets. It carries no
//! async runtime or HTTP dependencies so the same store can be driven by the
//! gateway's publisher, by tests, or by any other host.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Fallible paths surface as `MarketError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{MarketError, Result};
