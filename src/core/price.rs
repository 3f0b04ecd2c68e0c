//! Price oracle abstraction

use anyhow::Result;
use async_trait::async_trait;

/// Trading-pair symbol as understood by spot exchanges, e.g. `BTC` + `USDT` -> `BTCUSDT`.
pub fn pair_symbol(base: &str, quote: &str) -> String {
    format!("{base}{quote}")
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Current price of one unit of `base` expressed in `quote`.
    ///
    /// Implementations must fail rather than return a zero or otherwise
    /// meaningless price for an unknown pair.
    async fn fetch_price(&self, base: &str, quote: &str) -> Result<f64>;
}
