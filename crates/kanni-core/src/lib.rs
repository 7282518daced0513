//! kanni core: metric identity, the in-process metrics store, the Prometheus
//! text exporter, and tip selection.
//!
//! This crate carries no transport or runtime dependencies. The gateway owns
//! one [`metrics::AppMetrics`] per process and threads it to every call site.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Store writes are
//! total; only config, decoding and tip planning surface `KanniError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;
pub mod tips;

/// Shared result type.
pub use error::{Result, KanniError};
