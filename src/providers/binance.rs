use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::BinanceProviderConfig;
use crate::core::price::{PriceProvider, pair_symbol};

/// Binance public spot ticker. Every call hits the network; no caching, no retry.
pub struct BinanceProvider {
    base_url: String,
    client: reqwest::Client,
}

impl BinanceProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("wallet-tracker/0.1")
            .timeout(timeout)
            .build()?;
        Ok(BinanceProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &BinanceProviderConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }
}

// Binance answers both `{"symbol":"BTCUSDT","price":"60000.00"}` and
// `{"code":-1121,"msg":"Invalid symbol."}` on the same endpoint.
#[derive(Deserialize, Debug)]
struct TickerResponse {
    price: Option<String>,
    #[serde(default)]
    code: i64,
    msg: Option<String>,
}

#[async_trait]
impl PriceProvider for BinanceProvider {
    #[instrument(
        name = "BinancePriceFetch",
        skip_all,
        fields(base = %base, quote = %quote)
    )]
    async fn fetch_price(&self, base: &str, quote: &str) -> Result<f64> {
        let symbol = pair_symbol(base, quote);
        let endpoint = format!("{}/api/v3/ticker/price", self.base_url);
        // Query values are percent-encoded, so `#`, `&` or `?` cannot change the pair
        let url = reqwest::Url::parse_with_params(&endpoint, &[("symbol", symbol.as_str())])
            .with_context(|| format!("Invalid price endpoint: {endpoint}"))?;
        debug!("Requesting price from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for pair: {}", e, symbol))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response for pair: {symbol}"))?;
        debug!(%status, body = %text, "Received Binance response");

        let data: TickerResponse = match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(_) if !status.is_success() => {
                return Err(anyhow!("HTTP error: {} for pair: {}", status, symbol));
            }
            Err(e) => {
                return Err(anyhow!(
                    "Failed to parse JSON response for {}: {}",
                    symbol,
                    e
                ));
            }
        };

        if data.code != 0 {
            debug!(code = data.code, msg = ?data.msg, "Binance rejected pair {}", symbol);
            return Err(anyhow!("uncorrect currency"));
        }
        if !status.is_success() {
            return Err(anyhow!("HTTP error: {} for pair: {}", status, symbol));
        }

        let price = data
            .price
            .ok_or_else(|| anyhow!("No price data found for pair: {}", symbol))?;
        let price: f64 = price
            .parse()
            .map_err(|e| anyhow!("Invalid price \"{}\" for pair {}: {}", price, symbol, e))?;
        if !price.is_finite() || price <= 0.0 {
            return Err(anyhow!("Invalid price {} for pair: {}", price, symbol));
        }

        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(symbol: &str, status: u16, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/ticker/price"))
            .and(query_param("symbol", symbol))
            .respond_with(ResponseTemplate::new(status).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(mock_server: &MockServer) -> BinanceProvider {
        BinanceProvider::new(&mock_server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_price_fetch() {
        let mock_server =
            create_mock_server("BTCUSDT", 200, r#"{"symbol":"BTCUSDT","price":"60000.50"}"#).await;

        let price = provider(&mock_server)
            .fetch_price("BTC", "USDT")
            .await
            .unwrap();
        assert_eq!(price, 60000.50);
    }

    #[tokio::test]
    async fn test_invalid_symbol() {
        let mock_server =
            create_mock_server("XYZUSDT", 400, r#"{"code":-1121,"msg":"Invalid symbol."}"#).await;

        let result = provider(&mock_server).fetch_price("XYZ", "USDT").await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().to_string(), "uncorrect currency");
    }

    #[tokio::test]
    async fn test_reserved_characters_do_not_select_another_pair() {
        let mock_server =
            create_mock_server("ETHBTC", 200, r#"{"symbol":"ETHBTC","price":"0.05"}"#).await;
        let provider = provider(&mock_server);

        for base in ["ETHBTC#", "ETHBTC&x=", "ETHBTC?"] {
            let result = provider.fetch_price(base, "USDT").await;
            assert!(result.is_err(), "{base} should not be priced as ETHBTC");
        }

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("symbol=ETHBTC%23USDT"));
    }

    #[tokio::test]
    async fn test_server_error_without_json() {
        let mock_server = create_mock_server("BTCUSDT", 502, "<html>Bad Gateway</html>").await;

        let result = provider(&mock_server).fetch_price("BTC", "USDT").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 502 Bad Gateway for pair: BTCUSDT"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = create_mock_server("BTCUSDT", 200, "not json").await;

        let result = provider(&mock_server).fetch_price("BTC", "USDT").await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for BTCUSDT")
        );
    }

    #[tokio::test]
    async fn test_missing_or_zero_price_is_an_error() {
        let mock_server = create_mock_server("BTCUSDT", 200, r#"{"symbol":"BTCUSDT"}"#).await;
        let result = provider(&mock_server).fetch_price("BTC", "USDT").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No price data found for pair: BTCUSDT"
        );

        let mock_server =
            create_mock_server("BTCUSDT", 200, r#"{"symbol":"BTCUSDT","price":"0.00"}"#).await;
        let result = provider(&mock_server).fetch_price("BTC", "USDT").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid price 0 for pair: BTCUSDT"
        );
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker/price"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"symbol":"BTCUSDT","price":"1.0"}"#)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let provider = BinanceProvider::new(&mock_server.uri(), Duration::from_millis(50)).unwrap();
        let result = provider.fetch_price("BTC", "USDT").await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("Request error:")
        );
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Nothing listens on the discard port
        let provider =
            BinanceProvider::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let result = provider.fetch_price("BTC", "USDT").await;
        assert!(result.is_err());
    }
}
