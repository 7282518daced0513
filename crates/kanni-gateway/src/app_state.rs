//! Shared application state for the kanni gateway.
//!
//! Holds the validated config and the process-wide `AppMetrics`. The metrics
//! facade is single-writer; handlers take the lock only for synchronous
//! record/export calls.

use std::sync::Arc;

use tokio::sync::Mutex;

use kanni_core::metrics::{AppMetrics, MetricsStore};

use crate::config::KanniConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<Mutex<AppMetrics>>,
}

struct AppStateInner {
    cfg: KanniConfig,
}

impl AppState {
    /// Build application state, choosing the recording strategy from config.
    pub fn new(cfg: KanniConfig) -> Self {
        let store = MetricsStore::new().with_series_limit(cfg.metrics.max_series_per_family);
        let metrics = AppMetrics::with_store(cfg.metrics.enable_metrics, cfg.export_info(), store);
        Self::with_metrics(cfg, metrics)
    }

    pub fn with_metrics(cfg: KanniConfig, metrics: AppMetrics) -> Self {
        tracing::info!(
            enabled = metrics.is_enabled(),
            service = %metrics.info().service,
            environment = %metrics.info().environment,
            "metrics initialised"
        );
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            metrics: Arc::new(Mutex::new(metrics)),
        }
    }

    pub fn cfg(&self) -> &KanniConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<Mutex<AppMetrics>> {
        Arc::clone(&self.metrics)
    }
}
