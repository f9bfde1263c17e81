use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Daily aggregate bar
// ---------------------------------------------------------------------------

/// One daily OHLCV bar from the aggregates endpoint. Polygon uses
/// single-letter field names on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AggregateBar {
    #[serde(rename = "o", default)]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v", default)]
    pub volume: f64,
    /// Millisecond epoch start of the bar.
    #[serde(rename = "t", default)]
    pub timestamp: i64,
}

// ---------------------------------------------------------------------------
// Enriched quote
// ---------------------------------------------------------------------------

/// The per-symbol record produced only when all four upstream facets were
/// obtainable. Serializes camelCase to match the scan API payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedQuote {
    pub symbol: String,
    /// Current/last price.
    pub price: f64,
    pub prev_close: f64,
    /// Percent change vs previous close.
    pub change: f64,
    /// Percent gap vs previous close. Same formula as `change`; the scan
    /// payload exposes both fields, so both are kept.
    pub gap: f64,
    /// Current session volume.
    pub volume: f64,
    /// Mean daily volume over the lookback window.
    pub avg_volume: f64,
    pub market_cap: f64,
    /// Estimated free float (shares outstanding scaled by a fixed ratio).
    pub float: f64,
    /// Always in [0, 100].
    pub rsi: f64,
    /// Volume-weighted average price over the trailing VWAP window;
    /// 0 only when that window had no bars.
    pub vwap: f64,
}

/// The ordered set of quotes that passed the A+ filter. Built fresh per
/// scan invocation, never persisted here.
pub type ScanResult = Vec<EnrichedQuote>;
