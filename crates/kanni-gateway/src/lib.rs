//! kanni gateway library entry.
//!
//! Hosts the core metrics store behind an axum service: Prometheus scrape
//! endpoint, client event ingestion, request-metrics middleware and tip
//! planning. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod events;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;
pub mod telemetry;
