//! Scan orchestration: credential precondition, batched fetching, then the
//! A+ filter. Stateless — repeated calls share nothing but the HTTP
//! connection pool.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::client::PolygonClient;
use crate::config::{ScreeningConfig, BATCH_PAUSE_MS, BATCH_SIZE};
use crate::error::{FetchError, ScanError};
use crate::filter::filter_a_plus;
use crate::scheduler::run_batches;
use crate::types::{EnrichedQuote, ScanResult};
use crate::universe::STOCK_UNIVERSE;

/// Run one full scan of the configured universe against Polygon.
///
/// The heavy work runs on a spawned task so a panic anywhere in the
/// pipeline surfaces as `ScanFailed` instead of tearing down the server.
/// Dropping the returned future detaches that task (it finishes and is
/// discarded); there is no internal deadline beyond the per-request HTTP
/// timeout, so callers wanting a scan deadline wrap this future themselves.
pub async fn run_scan(
    client: Arc<PolygonClient>,
    credential: String,
    cfg: ScreeningConfig,
) -> Result<ScanResult, ScanError> {
    let task = tokio::spawn(async move {
        let fetch = |symbol: String| {
            let client = &client;
            let credential = credential.as_str();
            async move { client.fetch_symbol(&symbol, credential).await }
        };
        scan_with(fetch, STOCK_UNIVERSE, &credential, &cfg).await
    });

    task.await
        .map_err(|e| ScanError::ScanFailed(e.to_string()))?
}

/// Scan `universe` using an injected fetch function — the seam the tests
/// mock. Rejects an empty credential before any fetch is issued.
pub async fn scan_with<F, Fut>(
    fetch: F,
    universe: &[&str],
    credential: &str,
    cfg: &ScreeningConfig,
) -> Result<ScanResult, ScanError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<EnrichedQuote, FetchError>>,
{
    if credential.trim().is_empty() {
        return Err(ScanError::MissingCredential);
    }

    info!(
        "[SCAN] starting: {} symbols in batches of {BATCH_SIZE}, {BATCH_PAUSE_MS}ms pause",
        universe.len()
    );

    let quotes = run_batches(
        universe,
        BATCH_SIZE,
        Duration::from_millis(BATCH_PAUSE_MS),
        fetch,
    )
    .await;
    let fetched = quotes.len();

    let matched = filter_a_plus(quotes, cfg);
    info!(
        "[SCAN] complete: {fetched}/{} symbols enriched, {} A+ setups",
        universe.len(),
        matched.len()
    );

    Ok(matched)
}
