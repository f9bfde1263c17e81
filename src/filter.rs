//! The composite A+ setup predicate, applied per quote with no
//! cross-symbol comparison.

use crate::config::ScreeningConfig;
use crate::types::EnrichedQuote;

/// True when every leg of the A+ criterion holds: market cap, average
/// volume, and price strictly above their floors, price strictly above
/// VWAP, and RSI inside the band (inclusive on both ends).
pub fn meets_a_plus(quote: &EnrichedQuote, cfg: &ScreeningConfig) -> bool {
    quote.market_cap > cfg.market_cap_min
        && quote.avg_volume > cfg.avg_volume_min
        && quote.price > cfg.price_min
        && quote.price > quote.vwap
        && quote.rsi >= cfg.rsi_min
        && quote.rsi <= cfg.rsi_max
}

/// Keep only quotes meeting the A+ criterion. Input order is preserved;
/// no ranking or sorting happens here.
pub fn filter_a_plus(quotes: Vec<EnrichedQuote>, cfg: &ScreeningConfig) -> Vec<EnrichedQuote> {
    quotes
        .into_iter()
        .filter(|quote| meets_a_plus(quote, cfg))
        .collect()
}
