//! `kanni.yaml` loading.
//!
//! Unknown keys are rejected at every level. Read failures are internal
//! errors; YAML and validation failures are bad requests and name the
//! offending line when the parser reports one.

pub mod schema;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use kanni_core::error::{KanniError, Result};

pub use schema::{AppSection, KanniConfig, MetricsSection, ServerSection, TelemetrySection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<KanniConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => KanniError::Internal(format!("config not found: {}", path.display())),
        _ => KanniError::Internal(format!("config unreadable ({}): {e}", path.display())),
    })?;
    load_from_str(&text)
}

pub fn load_from_str(text: &str) -> Result<KanniConfig> {
    let cfg: KanniConfig = serde_yaml::from_str(text).map_err(|e| {
        let msg = match e.location() {
            Some(loc) => format!("invalid yaml at line {}: {e}", loc.line()),
            None => format!("invalid yaml: {e}"),
        };
        KanniError::BadRequest(msg)
    })?;
    cfg.validate()?;
    Ok(cfg)
}
