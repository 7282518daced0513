//! kanni gateway
//!
//! - `GET /metrics`: Prometheus scrape of the in-process store
//! - `POST /v1/events`: client telemetry events
//! - `POST /v1/tips/plan`: tip interest selection + prompts
//!
//! Config path is the first argument (default `kanni.yaml`). In production,
//! event logs are also shipped to `telemetry.otlp_logs_endpoint` when set.

use kanni_gateway::config::{self, KanniConfig};
use kanni_gateway::telemetry::{self, OtlpExporter};
use kanni_gateway::{app_state, error::BootError, router};

const DEFAULT_CONFIG_PATH: &str = "kanni.yaml";

#[tokio::main]
async fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let (cfg, exporter) = match boot(&path) {
        Ok(v) => v,
        Err(e) => {
            telemetry::init(None);
            tracing::error!(error = %e, config = %path, "kanni-gateway failed to start");
            std::process::exit(1);
        }
    };
    let shipping_to = exporter.as_ref().map(|x| x.endpoint().to_string());
    telemetry::init(exporter);
    if let Some(endpoint) = shipping_to {
        tracing::info!(%endpoint, "shipping event logs over otlp");
    }

    if let Err(e) = run(cfg, &path).await {
        tracing::error!(error = %e, "kanni-gateway failed");
        std::process::exit(1);
    }
}

fn boot(path: &str) -> Result<(KanniConfig, Option<OtlpExporter>), BootError> {
    let cfg = config::load_from_file(path)?;
    let exporter = cfg
        .otlp_logs_endpoint()
        .map(|url| OtlpExporter::new(url, cfg.export_info(), cfg.telemetry.timeout()))
        .transpose()?;
    Ok((cfg, exporter))
}

async fn run(cfg: KanniConfig, path: &str) -> Result<(), BootError> {
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "kanni-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("kanni-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}
