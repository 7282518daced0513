//! Built-in request services.

pub mod tips;
