use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use kanni_core::error::{KanniError, Result};
use kanni_core::metrics::{ExportInfo, DEFAULT_SERIES_LIMIT};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KanniConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub app: AppSection,

    #[serde(default)]
    pub metrics: MetricsSection,

    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl KanniConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(KanniError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.app.validate()?;
        self.metrics.validate()?;
        self.telemetry.validate()?;

        Ok(())
    }

    /// Labels for the `app_info` gauge.
    pub fn export_info(&self) -> ExportInfo {
        ExportInfo::new(&self.app.service, &self.app.version, self.metrics.production)
    }

    /// Collector for event logs; only production deployments ship them.
    pub fn otlp_logs_endpoint(&self) -> Option<&str> {
        if !self.metrics.production {
            return None;
        }
        self.telemetry.otlp_logs_endpoint.as_deref()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            KanniError::BadRequest(format!(
                "server.listen must be a valid SocketAddr, got {:?}",
                self.listen
            ))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    #[serde(default = "default_service")]
    pub service: String,

    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            service: default_service(),
            version: default_version(),
        }
    }
}

impl AppSection {
    pub fn validate(&self) -> Result<()> {
        if self.service.trim().is_empty() {
            return Err(KanniError::BadRequest("app.service must not be empty".into()));
        }
        if self.version.trim().is_empty() {
            return Err(KanniError::BadRequest("app.version must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Gates every write and the real `/metrics` body.
    #[serde(default = "default_true")]
    pub enable_metrics: bool,

    /// Selects the `environment` label on `app_info`.
    #[serde(default)]
    pub production: bool,

    /// Distinct label sets per metric name before overflow folding.
    #[serde(default = "default_series_limit")]
    pub max_series_per_family: usize,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            enable_metrics: true,
            production: false,
            max_series_per_family: default_series_limit(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if self.max_series_per_family == 0 {
            return Err(KanniError::BadRequest(
                "metrics.max_series_per_family must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    /// OTLP/HTTP logs URL, e.g. `http://collector:4318/v1/logs`.
    #[serde(default)]
    pub otlp_logs_endpoint: Option<String>,

    #[serde(default = "default_otlp_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            otlp_logs_endpoint: None,
            timeout_ms: default_otlp_timeout_ms(),
        }
    }
}

impl TelemetrySection {
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.otlp_logs_endpoint {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(KanniError::BadRequest(format!(
                    "telemetry.otlp_logs_endpoint must be an http(s) URL, got {url:?}"
                )));
            }
        }
        if self.timeout_ms == 0 {
            return Err(KanniError::BadRequest("telemetry.timeout_ms must be >= 1".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_service() -> String {
    "kanni-ai-frontend".into()
}
fn default_version() -> String {
    "1.0.0".into()
}
fn default_true() -> bool {
    true
}
fn default_series_limit() -> usize {
    DEFAULT_SERIES_LIMIT
}
fn default_otlp_timeout_ms() -> u64 {
    3000
}
