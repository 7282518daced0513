//! Top-level facade crate for kanni.
//!
//! Re-exports the core metrics/tip types and the gateway service so users can depend on a single crate.

pub mod core {
    pub use kanni_core::*;
}

pub mod gateway {
    pub use kanni_gateway::*;
}
