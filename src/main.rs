mod api;
mod client;
mod config;
mod error;
mod filter;
mod indicators;
mod scanner;
mod scheduler;
mod types;
mod universe;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::api::routes::{router, ApiState};
use crate::client::PolygonClient;
use crate::config::{Config, BATCH_PAUSE_MS, BATCH_SIZE};
use crate::error::Result;
use crate::universe::STOCK_UNIVERSE;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let client = Arc::new(PolygonClient::new(&cfg.polygon_api_url)?);
    info!(
        "Universe: {} symbols, batches of {BATCH_SIZE} with {BATCH_PAUSE_MS}ms pause; upstream {}",
        STOCK_UNIVERSE.len(),
        cfg.polygon_api_url,
    );
    info!(
        "[CRITERIA] market_cap > {:.0}, avg_volume > {:.0}, price > {:.2}, rsi in [{}, {}]",
        cfg.screening.market_cap_min,
        cfg.screening.avg_volume_min,
        cfg.screening.price_min,
        cfg.screening.rsi_min,
        cfg.screening.rsi_max,
    );

    let state = ApiState {
        client,
        screening: cfg.screening,
    };
    let app = router(state);

    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
