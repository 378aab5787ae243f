use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use pushwatch_github::GitHubPoller;
use pushwatch_relay::config::{DEFAULT_CONFIG_PATH, RelayConfig};
use pushwatch_relay::delivery::deliver_lines;

#[tokio::main]
async fn main() {
    // stdout is the relay channel; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match RelayConfig::load(&path).and_then(|c| c.validate().map(|()| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Couldn't load configuration");
            std::process::exit(1);
        },
    };
    tracing::info!(config = ?config, "Configuration");

    let poller = match GitHubPoller::new(config.poller_config()) {
        Ok(poller) => poller,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create HTTP client");
            std::process::exit(1);
        },
    };

    let (tx, rx) = mpsc::channel::<String>(config.delivery.queue_capacity);
    let delivery = tokio::spawn(deliver_lines(rx, tokio::io::stdout()));

    tracing::info!(
        users = ?config.github.users,
        interval_secs = config.github.poll_interval_secs,
        "pushwatch starting"
    );
    poller.run(tx).await;

    match delivery.await {
        Ok(Ok(n)) => tracing::info!(delivered = n, "Delivery finished"),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Relay output failed");
            std::process::exit(1);
        },
        Err(e) => {
            tracing::error!(error = %e, "Delivery task panicked");
            std::process::exit(1);
        },
    }
}
