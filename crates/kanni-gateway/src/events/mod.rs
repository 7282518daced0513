//! Client event ingestion (`POST /v1/events`).
//!
//! The browser reports what happened (page views, auth, interest CRUD, its
//! own outbound HTTP calls); each event bumps the matching metrics and emits
//! one structured log line on the `kanni::events` target.

pub mod handler;
pub mod labels;
pub mod schema;

pub use handler::{apply, ingest, log_event};
pub use schema::{ClientEvent, InterestRef, UserIdentity};
