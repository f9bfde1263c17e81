//! Market data client: fetches the four Polygon facets for one symbol
//! (previous close, snapshot, reference details, daily aggregates) and
//! normalizes them into an [`EnrichedQuote`].
//!
//! Every failure here is per-symbol. The batch scheduler absorbs it; a
//! symbol that cannot produce all four facets yields no record at all
//! rather than a record with guessed values.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tracing::debug;

use crate::config::{FLOAT_ESTIMATE_RATIO, HTTP_TIMEOUT_SECS, LOOKBACK_DAYS, VWAP_WINDOW};
use crate::error::FetchError;
use crate::indicators::{compute_rsi, compute_vwap, percent_change};
use crate::types::{AggregateBar, EnrichedQuote};

pub struct PolygonClient {
    http: reqwest::Client,
    base_url: String,
}

impl PolygonClient {
    /// Build a client against `base_url` (overridable for tests and
    /// proxies). The reqwest client is shared across all fetches so the
    /// connection pool is reused within and across batches.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch and enrich one symbol: four sequential upstream calls, then
    /// indicator derivation. Returns an error on the first facet that is
    /// unobtainable — the caller drops the symbol, never retries.
    pub async fn fetch_symbol(
        &self,
        symbol: &str,
        api_key: &str,
    ) -> Result<EnrichedQuote, FetchError> {
        let prev_close = self.fetch_prev_close(symbol, api_key).await?;
        let (price, volume) = self.fetch_snapshot(symbol, api_key, prev_close).await?;
        let (market_cap, shares_outstanding) = self.fetch_reference(symbol, api_key).await?;
        let bars = self.fetch_aggregates(symbol, api_key).await?;

        debug!(
            "[FETCH] {symbol}: price {price:.2}, prev_close {prev_close:.2}, {} bars",
            bars.len()
        );
        Ok(enrich(
            symbol,
            price,
            prev_close,
            volume,
            market_cap,
            shares_outstanding,
            &bars,
        ))
    }

    async fn fetch_prev_close(&self, symbol: &str, api_key: &str) -> Result<f64, FetchError> {
        let url = format!(
            "{}/v2/aggs/ticker/{}/prev?adjusted=true&apiKey={}",
            self.base_url, symbol, api_key
        );
        let body = self.get_json(&url).await?;
        let prev_close =
            parse_prev_close(&body).ok_or(FetchError::MissingFacet("previous close"))?;
        // A zero close would leave the change/gap percentages undefined.
        if prev_close == 0.0 {
            return Err(FetchError::MissingFacet("previous close"));
        }
        Ok(prev_close)
    }

    async fn fetch_snapshot(
        &self,
        symbol: &str,
        api_key: &str,
        prev_close: f64,
    ) -> Result<(f64, f64), FetchError> {
        let url = format!(
            "{}/v2/snapshot/locale/us/markets/stocks/tickers/{}?apiKey={}",
            self.base_url, symbol, api_key
        );
        let body = self.get_json(&url).await?;
        parse_snapshot(&body, prev_close).ok_or(FetchError::MissingFacet("snapshot ticker"))
    }

    async fn fetch_reference(
        &self,
        symbol: &str,
        api_key: &str,
    ) -> Result<(f64, f64), FetchError> {
        let url = format!(
            "{}/v3/reference/tickers/{}?apiKey={}",
            self.base_url, symbol, api_key
        );
        let body = self.get_json(&url).await?;
        Ok(parse_reference(&body))
    }

    async fn fetch_aggregates(
        &self,
        symbol: &str,
        api_key: &str,
    ) -> Result<Vec<AggregateBar>, FetchError> {
        let now_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let (from, to) = lookback_window(now_secs, LOOKBACK_DAYS);
        let url = format!(
            "{}/v2/aggs/ticker/{}/range/1/day/{}/{}?adjusted=true&sort=asc&apiKey={}",
            self.base_url, symbol, from, to, api_key
        );
        let body = self.get_json(&url).await?;
        parse_aggregates(&body)
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(FetchError::Unauthorized);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(resp.json().await?)
    }
}

// ---------------------------------------------------------------------------
// Payload normalization — pure over serde_json::Value, unit-tested below
// ---------------------------------------------------------------------------

fn parse_prev_close(body: &Value) -> Option<f64> {
    body.get("results")?.as_array()?.first()?.get("c")?.as_f64()
}

/// Price precedence: session close, else intraday-minute close, else
/// prior-day close, else the previous close already fetched. Zero prices
/// are treated as absent (the upstream zero-fills quiet sessions). Current
/// volume defaults to 0 when the day block has none.
fn parse_snapshot(body: &Value, prev_close: f64) -> Option<(f64, f64)> {
    let ticker = body.get("ticker")?;
    let price = nested_price(ticker, "day")
        .or_else(|| nested_price(ticker, "min"))
        .or_else(|| nested_price(ticker, "prevDay"))
        .unwrap_or(prev_close);
    let volume = ticker
        .get("day")
        .and_then(|d| d.get("v"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    Some((price, volume))
}

fn nested_price(ticker: &Value, block: &str) -> Option<f64> {
    ticker
        .get(block)?
        .get("c")?
        .as_f64()
        .filter(|price| *price != 0.0)
}

/// Market cap and shares outstanding, both defaulting to 0 when the
/// reference payload omits them. Unlike the other facets, a sparse
/// reference result does not skip the symbol.
fn parse_reference(body: &Value) -> (f64, f64) {
    let results = body.get("results");
    let market_cap = results
        .and_then(|r| r.get("market_cap"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    let shares_outstanding = results
        .and_then(|r| r.get("share_class_shares_outstanding"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    (market_cap, shares_outstanding)
}

/// The ascending daily bar series; a missing or null `results` field means
/// no bars, while a malformed bar is a parse error that skips the symbol.
fn parse_aggregates(body: &Value) -> Result<Vec<AggregateBar>, FetchError> {
    match body.get("results") {
        Some(results) if !results.is_null() => Ok(serde_json::from_value(results.clone())?),
        _ => Ok(Vec::new()),
    }
}

/// Derive the enriched record from the raw facets. Pure.
///
/// RSI runs over the full close series (the indicator windows the first 14
/// samples itself); VWAP runs over only the trailing `VWAP_WINDOW` bars.
/// `change` and `gap` share one formula against the previous close — the
/// scan payload carries both fields, so both are populated.
fn enrich(
    symbol: &str,
    price: f64,
    prev_close: f64,
    volume: f64,
    market_cap: f64,
    shares_outstanding: f64,
    bars: &[AggregateBar],
) -> EnrichedQuote {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let avg_volume = if bars.is_empty() {
        0.0
    } else {
        bars.iter().map(|b| b.volume).sum::<f64>() / bars.len() as f64
    };
    let vwap_bars = &bars[bars.len().saturating_sub(VWAP_WINDOW)..];
    let change = percent_change(price, prev_close);

    EnrichedQuote {
        symbol: symbol.to_string(),
        price,
        prev_close,
        change,
        gap: change,
        volume,
        avg_volume,
        market_cap,
        float: shares_outstanding * FLOAT_ESTIMATE_RATIO,
        rsi: compute_rsi(&closes),
        vwap: compute_vwap(vwap_bars),
    }
}

// ---------------------------------------------------------------------------
// Date window
// ---------------------------------------------------------------------------

/// `(from, to)` as `YYYY-MM-DD`: `to` is the UTC date containing
/// `now_secs`, `from` is `lookback_days` calendar days earlier.
pub fn lookback_window(now_secs: u64, lookback_days: u64) -> (String, String) {
    let to_days = (now_secs / 86_400) as i64;
    let from_days = to_days - lookback_days as i64;
    (format_civil_date(from_days), format_civil_date(to_days))
}

/// Render days-since-Unix-epoch as a proleptic Gregorian `YYYY-MM-DD`.
fn format_civil_date(days_since_epoch: i64) -> String {
    let z = days_since_epoch + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let (year, month) = if mp < 10 {
        (yoe + era * 400, mp + 3)
    } else {
        (yoe + era * 400 + 1, mp - 9)
    };
    format!("{year:04}-{month:02}-{day:02}")
}
