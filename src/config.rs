use crate::error::{AppError, Result};

pub const POLYGON_API_URL: &str = "https://api.polygon.io";

/// Symbols fetched concurrently within one batch. Polygon's request-rate
/// ceiling is respected only through this cap plus the inter-batch pause.
pub const BATCH_SIZE: usize = 10;

/// Fixed pause between batches (milliseconds). A crude throttle, not
/// adaptive backoff.
pub const BATCH_PAUSE_MS: u64 = 100;

/// Daily-aggregate lookback window in calendar days.
pub const LOOKBACK_DAYS: u64 = 30;

/// Closing prices required before RSI is computed; shorter series return
/// the neutral 50.
pub const RSI_PERIOD: usize = 14;

/// VWAP trailing window — the last N daily bars of the lookback series.
pub const VWAP_WINDOW: usize = 5;

/// Estimated free float as a fraction of shares outstanding. A fixed
/// heuristic, not a real float figure.
pub const FLOAT_ESTIMATE_RATIO: f64 = 0.9;

/// Per-request timeout for upstream calls (seconds).
pub const HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub polygon_api_url: String,
    pub log_level: String,
    pub api_port: u16,
    pub screening: ScreeningConfig,
}

/// Thresholds for the A+ setup predicate. Immutable for the duration of a
/// scan; every bound is env-overridable for experimentation.
#[derive(Debug, Clone, Copy)]
pub struct ScreeningConfig {
    /// Market cap must exceed this (strict), USD.
    pub market_cap_min: f64,
    /// Mean daily volume over the lookback window must exceed this (strict).
    pub avg_volume_min: f64,
    /// Last price must exceed this (strict), USD.
    pub price_min: f64,
    /// RSI band, inclusive on both ends.
    pub rsi_min: f64,
    pub rsi_max: f64,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            market_cap_min: 10_000_000_000.0,
            avg_volume_min: 5_000_000.0,
            price_min: 5.0,
            rsi_min: 50.0,
            rsi_max: 70.0,
        }
    }
}

impl ScreeningConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            market_cap_min: env_f64("SCREENER_MARKET_CAP_MIN", defaults.market_cap_min),
            avg_volume_min: env_f64("SCREENER_AVG_VOLUME_MIN", defaults.avg_volume_min),
            price_min: env_f64("SCREENER_PRICE_MIN", defaults.price_min),
            rsi_min: env_f64("SCREENER_RSI_MIN", defaults.rsi_min),
            rsi_max: env_f64("SCREENER_RSI_MAX", defaults.rsi_max),
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            polygon_api_url: std::env::var("POLYGON_API_URL")
                .unwrap_or_else(|_| POLYGON_API_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            screening: ScreeningConfig::from_env(),
        })
    }
}
