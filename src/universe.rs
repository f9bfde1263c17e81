/// The fixed candidate set considered on every scan: 90 US large caps.
/// Order matters for batch iteration (batches are contiguous slices of
/// this list), not for scan output.
pub const STOCK_UNIVERSE: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "BRK.B", "V", "UNH",
    "JNJ", "WMT", "JPM", "MA", "PG", "XOM", "HD", "CVX", "LLY", "ABBV",
    "MRK", "AVGO", "KO", "PEP", "COST", "TMO", "BAC", "CSCO", "ACN", "MCD",
    "ADBE", "DHR", "NFLX", "ABT", "CRM", "VZ", "DIS", "NKE", "CMCSA", "TXN",
    "AMD", "INTC", "QCOM", "ORCL", "PFE", "UPS", "RTX", "HON", "PM", "NEE",
    "UNP", "LOW", "SPGI", "COP", "IBM", "BA", "GS", "INTU", "BMY", "AMGN",
    "BLK", "SBUX", "AXP", "DE", "CAT", "GILD", "MDLZ", "LMT", "ADI", "ISRG",
    "NOW", "TJX", "SYK", "PLD", "BKNG", "VRTX", "MMM", "CI", "ZTS", "CB",
    "REGN", "MO", "EOG", "DUK", "SO", "BDX", "HUM", "PNC", "USB", "AON",
];
