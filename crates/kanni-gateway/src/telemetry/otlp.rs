//! OTLP/HTTP log export (JSON encoding).
//!
//! Fire-and-forget: each record is POSTed once from a background task. A
//! failed delivery is logged at warn level and dropped; nothing is retried
//! and no error reaches the request that produced the log.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::Level;

use kanni_core::error::{KanniError, Result};
use kanni_core::metrics::ExportInfo;

use super::{EventLogLayer, LogRecord};

/// Records buffered between the handlers and the delivery task.
pub const QUEUE_CAPACITY: usize = 1024;

const SHIPPER_TARGET: &str = "kanni::otlp";

pub struct OtlpExporter {
    client: reqwest::Client,
    endpoint: String,
    resource: ExportInfo,
}

impl OtlpExporter {
    pub fn new(endpoint: impl Into<String>, resource: ExportInfo, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| KanniError::Internal(format!("otlp client init failed: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            resource,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Start the delivery task and return the layer that feeds it.
    pub fn spawn(self) -> EventLogLayer {
        let (layer, mut rx) = EventLogLayer::channel(QUEUE_CAPACITY);
        tokio::spawn(async move {
            while let Some(record) = rx.recv().await {
                self.deliver(&record).await;
            }
        });
        layer
    }

    pub async fn deliver(&self, record: &LogRecord) {
        let body = payload(&self.resource, record);
        match self.client.post(&self.endpoint).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => {
                tracing::warn!(
                    target: SHIPPER_TARGET,
                    { status = resp.status().as_u16(), endpoint = %self.endpoint },
                    "otlp collector rejected log"
                );
            }
            Err(e) => {
                tracing::warn!(
                    target: SHIPPER_TARGET,
                    { error = %e, endpoint = %self.endpoint },
                    "failed to send log to otlp collector"
                );
            }
        }
    }
}

pub fn severity_number(level: Level) -> u8 {
    match level {
        Level::TRACE => 1,
        Level::DEBUG => 5,
        Level::INFO => 9,
        Level::WARN => 13,
        _ => 17,
    }
}

/// `ExportLogsServiceRequest` carrying one record; attribute values are strings.
pub fn payload(resource: &ExportInfo, record: &LogRecord) -> Value {
    let attributes: Vec<Value> = record
        .attributes
        .iter()
        .map(|(k, v)| json!({ "key": k, "value": { "stringValue": v } }))
        .collect();
    json!({
        "resourceLogs": [{
            "resource": {
                "attributes": [
                    { "key": "service.name", "value": { "stringValue": resource.service } },
                    { "key": "service.version", "value": { "stringValue": resource.version } },
                    { "key": "deployment.environment", "value": { "stringValue": resource.environment } },
                ]
            },
            "scopeLogs": [{
                "logRecords": [{
                    "timeUnixNano": record.time_unix_nano.to_string(),
                    "severityText": record.level.as_str(),
                    "severityNumber": severity_number(record.level),
                    "body": { "stringValue": record.body },
                    "attributes": attributes,
                }]
            }]
        }]
    })
}
