use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use travel_search::{server, Dataset, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env()?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    // Loaded once, before the listener is bound, and never modified afterwards
    let dataset = Arc::new(Dataset::load(&config));

    server::run(&config, dataset).await
}
