//! CLI module for url-healthcheck
//!
//! Provides the command-line interface for the scheduled probe runner.

use clap::Parser;

/// URL Healthcheck - Probes configured endpoints and publishes up/down metrics
#[derive(Parser, Debug)]
#[command(name = "url-healthcheck")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    HEALTHCHECK_TARGETS        Comma-separated target names (required)
    <NAME>_URL                 URL for each listed target, e.g. FARGATE_URL (required)
    HEALTHCHECK_METRICS_URL    Metrics backend ingestion endpoint (required)
    HEALTHCHECK_NAMESPACE      Metric namespace (default: URLHealthCheck)
    HEALTHCHECK_TIMEOUT_SECS   Probe timeout in seconds (default: 10)
    RUST_LOG                   Log filter (default: info)
"#)]
pub struct Cli {
    /// Opaque trigger event from the scheduler (JSON), not interpreted
    #[arg(long)]
    pub event: Option<String>,
}
