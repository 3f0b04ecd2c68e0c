//! Values a user's holdings in two reference currencies.
use crate::core::config::ValuationConfig;
use crate::core::error::WalletError;
use crate::core::ledger::Account;
use crate::core::price::{PriceProvider, pair_symbol};
use std::fmt::Display;
use tracing::debug;

/// One holding valued in both reference currencies.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationLine {
    pub currency: String,
    pub balance: f64,
    pub quote_value: f64,
    pub fiat_value: f64,
}

/// A complete report. Only ever built when every quote succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub lines: Vec<ValuationLine>,
    pub total_quote: f64,
    pub total_fiat: f64,
    pub quote_label: String,
    pub fiat_label: String,
}

impl Display for Valuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Balance:")?;
        for line in &self.lines {
            writeln!(
                f,
                "{}: {:.6} [{:.2} {} {:.2} {}]",
                line.currency,
                line.balance,
                line.quote_value,
                self.quote_label,
                line.fiat_value,
                self.fiat_label
            )?;
        }
        writeln!(f, "Total:")?;
        writeln!(f, "{:.6} {}", self.total_quote, self.quote_label)?;
        writeln!(f, "{:.6} {}", self.total_fiat, self.fiat_label)
    }
}

/// Values `account` against the reference currencies in `config`.
///
/// The cross rate is always fetched first, even for an empty or missing
/// account. Any failed quote aborts the whole valuation.
pub async fn value_account(
    account: Option<&Account>,
    price_provider: &dyn PriceProvider,
    config: &ValuationConfig,
) -> Result<Valuation, WalletError> {
    let cross_rate = fetch(price_provider, &config.quote_currency, &config.fiat_currency).await?;

    let mut valuation = Valuation {
        lines: Vec::new(),
        total_quote: 0.0,
        total_fiat: 0.0,
        quote_label: config.quote_label.clone(),
        fiat_label: config.fiat_currency.clone(),
    };

    for (currency, balance) in account.into_iter().flat_map(|a| a.holdings()) {
        let price = fetch(price_provider, currency, &config.quote_currency).await?;
        let quote_value = balance * price;
        let fiat_value = quote_value * cross_rate;
        debug!(currency, balance, price, quote_value, fiat_value, "Valued holding");

        valuation.total_quote += quote_value;
        valuation.total_fiat += fiat_value;
        valuation.lines.push(ValuationLine {
            currency: currency.to_string(),
            balance,
            quote_value,
            fiat_value,
        });
    }

    Ok(valuation)
}

async fn fetch(
    price_provider: &dyn PriceProvider,
    base: &str,
    quote: &str,
) -> Result<f64, WalletError> {
    price_provider.fetch_price(base, quote).await.map_err(|e| {
        let pair = pair_symbol(base, quote);
        debug!("Quote for {} unavailable: {}", pair, e);
        WalletError::quote_unavailable(pair, &e)
    })
}
