//! Batch scheduler: chunked fan-out/fan-in over the universe with a fixed
//! pause between chunks to stay under the upstream request-rate ceiling.

use std::future::Future;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::types::EnrichedQuote;

/// Partition `universe` into contiguous chunks of `batch_size`, fetch each
/// chunk's symbols concurrently, and sleep `pause` between chunks.
///
/// Per-symbol failures are logged and dropped — never retried, never fatal.
/// The scheduler always processes every chunk and returns however many
/// quotes were obtainable. Output follows universe order across chunks;
/// within a chunk the order is an implementation detail callers must not
/// rely on.
pub async fn run_batches<F, Fut>(
    universe: &[&str],
    batch_size: usize,
    pause: Duration,
    fetch: F,
) -> Vec<EnrichedQuote>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<EnrichedQuote, FetchError>>,
{
    let mut quotes = Vec::new();

    for (index, chunk) in universe.chunks(batch_size).enumerate() {
        let results = join_all(chunk.iter().map(|symbol| fetch(symbol.to_string()))).await;

        for (symbol, result) in chunk.iter().zip(results) {
            match result {
                Ok(quote) => quotes.push(quote),
                Err(e) => warn!("[SCAN] skipping {symbol}: {e}"),
            }
        }
        debug!(
            "[SCAN] batch {} done ({}/{} symbols yielded quotes so far)",
            index + 1,
            quotes.len(),
            (index * batch_size + chunk.len()),
        );

        tokio::time::sleep(pause).await;
    }

    quotes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn quote(symbol: &str) -> EnrichedQuote {
        EnrichedQuote {
            symbol: symbol.to_string(),
            price: 10.0,
            prev_close: 9.5,
            change: 5.26,
            gap: 5.26,
            volume: 1_000.0,
            avg_volume: 2_000.0,
            market_cap: 1.0e9,
            float: 1.0e8,
            rsi: 55.0,
            vwap: 9.8,
        }
    }

    #[tokio::test]
    async fn fetches_every_symbol_across_chunks() {
        let symbols: Vec<String> = (0..25).map(|i| format!("SYM{i}")).collect();
        let universe: Vec<&str> = symbols.iter().map(String::as_str).collect();
        let calls = AtomicUsize::new(0);

        let quotes = run_batches(&universe, 10, Duration::ZERO, |symbol| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(quote(&symbol)) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 25);
        assert_eq!(quotes.len(), 25);

        let got: HashSet<String> = quotes.iter().map(|q| q.symbol.clone()).collect();
        let want: HashSet<String> = symbols.into_iter().collect();
        assert_eq!(got, want);
    }

    #[tokio::test]
    async fn failed_symbol_does_not_suppress_chunk_siblings() {
        let universe = ["AAA", "BAD", "CCC"];

        let quotes = run_batches(&universe, 10, Duration::ZERO, |symbol| async move {
            if symbol == "BAD" {
                Err(FetchError::MissingFacet("previous close"))
            } else {
                Ok(quote(&symbol))
            }
        })
        .await;

        let got: HashSet<&str> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(got, HashSet::from(["AAA", "CCC"]));
    }

    #[tokio::test]
    async fn all_failures_yield_empty_result_not_error() {
        let universe = ["AAA", "BBB"];
        let quotes = run_batches(&universe, 1, Duration::ZERO, |_symbol| async {
            Err(FetchError::Status(500))
        })
        .await;
        assert!(quotes.is_empty());
    }

    #[tokio::test]
    async fn cross_chunk_order_follows_universe() {
        let universe = ["AAA", "BBB", "CCC", "DDD"];
        let quotes = run_batches(&universe, 2, Duration::ZERO, |symbol| async move {
            Ok(quote(&symbol))
        })
        .await;

        // Chunk boundaries: symbols from chunk 1 precede symbols from chunk 2.
        let positions: Vec<usize> = ["AAA", "BBB", "CCC", "DDD"]
            .iter()
            .map(|s| quotes.iter().position(|q| q.symbol == *s).unwrap())
            .collect();
        assert!(positions[0].max(positions[1]) < positions[2].min(positions[3]));
    }
}
