//! Periodic health self-probe
//!
//! Every minute, GET the service's own health endpoint with a 5 s
//! timeout and log the outcome.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

const PROBE_INTERVAL: Duration = Duration::from_secs(60);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn run(port: u16, shutdown: CancellationToken) {
    let client = match reqwest::Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to build health probe client: {}", e);
            return;
        }
    };
    let url = format!("http://127.0.0.1:{port}/api/health");

    let mut interval = tokio::time::interval(PROBE_INTERVAL);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // First tick completes immediately; skip it so the listener is up
    interval.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = interval.tick() => {
                match client.get(&url).send().await {
                    Ok(resp) if resp.status().is_success() => {
                        tracing::info!(target: "health_probe", "Health check passed");
                    }
                    Ok(resp) => {
                        tracing::error!(target: "health_probe", status = %resp.status(), "Health check returned non-success status");
                    }
                    Err(e) => {
                        tracing::error!(target: "health_probe", "Health check failed: {}", e);
                    }
                }
            }
        }
    }
}
