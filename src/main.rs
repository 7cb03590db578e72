//! URL Healthcheck Entry Point

use std::time::Duration;

use clap::Parser;
use serde_json::Value;
use tracing::info;
use url_healthcheck::cli::Cli;
use url_healthcheck::config::ProbeConfig;
use url_healthcheck::logging;
use url_healthcheck::metrics::HttpMetricsPublisher;
use url_healthcheck::probe::HealthProber;
use url_healthcheck::runner::HealthProbeRunner;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init().expect("failed to initialize logging");

    // 設定は起動時に1回だけ構築し、不備はここで落とす
    let config = match ProbeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // トリガーイベントは不透明な値としてそのまま渡す
    let event = match cli.event.as_deref() {
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(value) => value,
            Err(e) => {
                eprintln!("Error: invalid --event JSON: {}", e);
                std::process::exit(1);
            }
        },
        None => Value::Null,
    };

    info!(
        targets = config.targets.len(),
        namespace = %config.namespace,
        "Starting health probe run"
    );

    let prober = HealthProber::new(Duration::from_secs(config.timeout_secs));
    let publisher = HttpMetricsPublisher::new(reqwest::Client::new(), config.metrics_url.clone());
    let runner = HealthProbeRunner::new(config.targets, prober, publisher, config.namespace);

    let response = runner.run(event).await;

    println!(
        "{}",
        serde_json::to_string(&response).expect("failed to serialize completion payload")
    );
}
